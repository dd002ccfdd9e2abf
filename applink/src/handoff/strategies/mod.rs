pub mod android;
pub mod direct;
pub mod ios;
pub mod windows_phone;

pub use android::*;
pub use direct::*;
pub use ios::*;
pub use windows_phone::*;
