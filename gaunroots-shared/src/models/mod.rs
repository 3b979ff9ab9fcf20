pub mod alerts;
pub mod errors;
pub mod product;
pub mod scan;
pub mod session;
pub mod user;

pub use alerts::{AlertRegistration, DiseaseReport};
pub use errors::ErrorBody;
pub use product::NewProduct;
pub use scan::ScanRequest;
pub use session::SessionRecord;
pub use user::{Credentials, RecordId, UserKind, UserUpdate};
