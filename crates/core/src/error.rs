use thiserror::Error;

use crate::model::CategoryError;
use crate::model::LessonError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Category(#[from] CategoryError),
}
