pub mod applicant;
pub mod emi;
pub mod sanction;
