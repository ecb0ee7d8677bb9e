//! Query-string construction for fetch calls.

// self
use crate::_prelude::*;

/// Query parameters encoded in key order.
pub type QueryParams = BTreeMap<String, String>;

/// Appends `params` to `path` as `key=value&...`, URL-encoding each pair.
///
/// Returns `path` untouched (no trailing `?`) when `params` is empty.
pub fn append_query(path: &str, params: &QueryParams) -> String {
	if params.is_empty() {
		return path.to_owned();
	}

	let encoded = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(params).finish();
	let separator = if path.contains('?') { '&' } else { '?' };

	format!("{path}{separator}{encoded}")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn params(pairs: &[(&str, &str)]) -> QueryParams {
		pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
	}

	#[test]
	fn empty_params_leave_path_untouched() {
		assert_eq!(append_query("/v1/vault/accounts", &QueryParams::new()), "/v1/vault/accounts");
	}

	#[test]
	fn params_are_sorted_and_encoded() {
		let query = params(&[("status", "COMPLETED"), ("after", "1 2&3"), ("limit", "10")]);

		assert_eq!(
			append_query("/v1/transactions", &query),
			"/v1/transactions?after=1+2%263&limit=10&status=COMPLETED",
		);
	}

	#[test]
	fn existing_query_is_extended() {
		let query = params(&[("limit", "5")]);

		assert_eq!(append_query("/v1/users?orderBy=name", &query), "/v1/users?orderBy=name&limit=5");
	}
}
