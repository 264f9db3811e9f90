mod readingcontroller;
mod dummyreadingcontroller;
mod apireadingcontroller;

pub use readingcontroller::ReadingController;
pub use readingcontroller::ReadingControllerPointer;
pub use readingcontroller::ReadingControllerSharedPointer;
pub use readingcontroller::ReadingError;
pub use readingcontroller::ReadingsResponse;
pub use readingcontroller::SubmitResponse;

pub use dummyreadingcontroller::DummyReadingController;

pub use apireadingcontroller::ApiReadingController;
