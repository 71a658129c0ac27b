use serde::{Deserialize, Serialize};

/// One rejected property, as reported by the remote validator or by
/// [`DataObject::validate`](crate::model::DataObject::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSideValidationError {
    pub error_message: String,
    #[serde(default)]
    pub property_name: String,
}

impl ServerSideValidationError {
    pub fn new(property_name: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
            property_name: property_name.into(),
        }
    }
}

/// Append-only list of validation errors. Success means the list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSideValidationResult {
    #[serde(default)]
    errors: Vec<ServerSideValidationError>,
}

impl ServerSideValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, property_name: impl Into<String>, error_message: impl Into<String>) {
        self.errors
            .push(ServerSideValidationError::new(property_name, error_message));
    }

    pub fn push(&mut self, error: ServerSideValidationError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ServerSideValidationError] {
        &self.errors
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors reported for one property.
    pub fn errors_for<'a>(
        &'a self,
        property_name: &'a str,
    ) -> impl Iterator<Item = &'a ServerSideValidationError> + 'a {
        self.errors
            .iter()
            .filter(move |error| error.property_name.eq_ignore_ascii_case(property_name))
    }
}

impl From<Vec<ServerSideValidationError>> for ServerSideValidationResult {
    fn from(errors: Vec<ServerSideValidationError>) -> Self {
        Self { errors }
    }
}

impl Extend<ServerSideValidationError> for ServerSideValidationResult {
    fn extend<I: IntoIterator<Item = ServerSideValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_errors() {
        let mut result = ServerSideValidationResult::new();
        assert!(result.is_success());

        result.add_error("Name", "required");
        result.extend(vec![ServerSideValidationError::new("Value", "too long")]);
        result.push(ServerSideValidationError::new("name", "too short"));

        assert!(!result.is_success());
        assert_eq!(result.errors().len(), 3);
        assert_eq!(result.errors_for("Name").count(), 2);
    }

    #[test]
    fn test_wire_form() {
        let json = r#"{"errors":[{"errorMessage":"required","propertyName":"Name"}]}"#;
        let result: ServerSideValidationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.errors()[0], ServerSideValidationError::new("Name", "required"));
    }
}
