pub mod registrations;
pub mod submissions;
pub mod teams;
