pub mod admission;
pub mod booking;
pub mod content;
pub mod gateway;
pub mod mail;
pub mod wizard;
