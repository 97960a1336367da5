use super::job::CompanyJob;

/// A company row.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with the jobs it has posted, ordered by job id.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetail {
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}
