//! Errors raised while reading graph inputs embedded in the host page.

/// Failure to load a JSON payload from a `<script>` element.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("no browser window available")]
	NoWindow,

	#[error("element #{0} not found")]
	MissingElement(String),

	#[error("element #{0} is not a <script>")]
	NotAScript(String),

	#[error("failed to parse #{id}: {source}")]
	Parse {
		id: String,
		#[source]
		source: serde_json::Error,
	},
}

impl LoadError {
	/// Whether the element was simply absent, as opposed to present but broken.
	pub fn is_missing(&self) -> bool {
		matches!(self, LoadError::MissingElement(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_element() {
		let err = serde_json::from_str::<u32>("nope").unwrap_err();
		let parse = LoadError::Parse {
			id: "graph-data".into(),
			source: err,
		};
		assert!(parse.to_string().starts_with("failed to parse #graph-data:"));
		assert!(!parse.is_missing());
		assert!(LoadError::MissingElement("graph-config".into()).is_missing());
	}
}
