use http::StatusCode;

/// Outcome envelope of a write or delete against the remote collection.
///
/// # Status policy
/// [`is_success`](Self::is_success) is true only for exactly `200 OK`. A
/// `201 Created` or `204 No Content` is *not* reported as success, even
/// though a 201 still carries the server's copy of the object. Callers that
/// accept any 2xx should use [`is_success_family`](Self::is_success_family).
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult<T> {
    pub data_object: Option<T>,
    pub status_code: StatusCode,
}

impl<T> OperationResult<T> {
    pub fn new(status_code: StatusCode, data_object: Option<T>) -> Self {
        Self {
            data_object,
            status_code,
        }
    }

    /// A result without an object, e.g. for deletes.
    pub fn status_only(status_code: StatusCode) -> Self {
        Self::new(status_code, None)
    }

    pub fn is_success(&self) -> bool {
        self.status_code == StatusCode::OK
    }

    pub fn is_success_family(&self) -> bool {
        self.status_code.is_success()
    }

    pub fn data_object(&self) -> Option<&T> {
        self.data_object.as_ref()
    }

    pub fn into_data_object(self) -> Option<T> {
        self.data_object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_is_success() {
        assert!(OperationResult::<()>::status_only(StatusCode::OK).is_success());

        let created = OperationResult::new(StatusCode::CREATED, Some(1));
        assert!(!created.is_success());
        assert!(created.is_success_family());
        assert_eq!(created.data_object(), Some(&1));

        let empty = OperationResult::<()>::status_only(StatusCode::NO_CONTENT);
        assert!(!empty.is_success());
        assert!(empty.is_success_family());

        assert!(!OperationResult::<()>::status_only(StatusCode::NOT_FOUND).is_success_family());
    }
}
