pub mod booking;
pub mod cases;
pub mod escalation;
pub mod gate;
pub mod hub;
