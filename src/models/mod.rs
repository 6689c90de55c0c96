pub mod availability;
pub mod booking;
pub mod contact;
pub mod waitlist;

pub use availability::DateStatus;
pub use booking::{Booking, BookingStatus};
pub use contact::Contact;
pub use waitlist::{WaitlistEntry, WaitlistStatus};
