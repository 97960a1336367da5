mod company;
mod job;

pub use company::{Company, CompanyDetail};
pub use job::{CompanyJob, Job, NewJob};
