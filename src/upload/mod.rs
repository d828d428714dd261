//! Upload pipeline
//!
//! Naming of uploaded files and their delivery to the FTP backend.

pub mod ftp;
pub mod naming;
pub mod uploader;

pub use ftp::{FtpConnector, FtpSession, SuppaFtpConnector};
pub use naming::{Clock, SystemClock, generate_filename, public_url};
pub use uploader::{FtpUploader, upload_to_ftp};
