//! Company and uploader flags shared by `submit` and `draft save`.

use clap::Args;
use datadrop_core::{FormFields, Uploader};

#[derive(Args, Debug, Default, Clone)]
pub struct IdentityArgs {
    /// Company name
    #[arg(long)]
    pub company: Option<String>,
    /// Name of the person responsible for the submission
    #[arg(long)]
    pub manager: Option<String>,
    /// Contact (email or phone) of the manager
    #[arg(long, requires = "manager")]
    pub contact: Option<String>,
    /// Additional uploader, as NAME or NAME=CONTACT (repeatable)
    #[arg(long = "uploader", value_name = "NAME[=CONTACT]")]
    pub uploaders: Vec<String>,
}

impl IdentityArgs {
    /// Build form fields from the flags, taking each slot the flags leave out
    /// from `draft`.
    ///
    /// Slots are the company, the manager (first uploader) and the additional
    /// uploaders. Flag values are passed through untrimmed.
    pub fn into_fields(self, draft: Option<&FormFields>) -> FormFields {
        let company = match self.company {
            Some(company) => company,
            None => draft.map(|d| d.company.clone()).unwrap_or_default(),
        };

        let manager = match self.manager {
            Some(name) => Some(Uploader::new(name, self.contact.unwrap_or_default())),
            None => draft.and_then(|d| d.primary_uploader().cloned()),
        };

        let others: Vec<Uploader> = if self.uploaders.is_empty() {
            draft
                .map(|d| d.uploaders.iter().skip(1).cloned().collect())
                .unwrap_or_default()
        } else {
            self.uploaders.iter().map(|u| Uploader::parse(u)).collect()
        };

        let uploaders = manager.into_iter().chain(others).collect();
        FormFields::new(company, uploaders)
    }
}
