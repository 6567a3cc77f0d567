use crate::ApiError;

pub trait Validator {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }

    fn assert_ok(&self) -> Result<(), ApiError> {
        self.validate()
    }
}
