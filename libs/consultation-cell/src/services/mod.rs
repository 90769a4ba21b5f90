pub mod consultations;
