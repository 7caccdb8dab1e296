//! Media library core: the upload-to-catalog write path shared by all
//! producers, and the filesystem-to-catalog reconciliation scan.

pub mod reconcile;
pub mod recorder;
pub mod upload;

pub use reconcile::reconcile_uploads;
pub use recorder::{RecordedUpload, record_media};
pub use upload::store_file_field;
