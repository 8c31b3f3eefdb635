//! Job Descriptions: built-in catalog and AI-generated descriptions.

use serde::Serialize;

use crate::llm_client::{LanguageModel, LlmError};
use crate::screening::prompts::JOB_DESCRIPTION_PROMPT_TEMPLATE;

/// A canned job description offered in the selection menu.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JobDescription {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Menu key that opens the custom-description options.
pub const CUSTOM_CHOICE: &str = "7";

/// Key used whenever a choice is invalid or a custom entry is left empty.
pub const DEFAULT_KEY: &str = "1";

pub const CATALOG: [JobDescription; 6] = [
    JobDescription {
        key: "1",
        title: "Junior Data Scientist",
        description: "We are looking for a Junior Data Scientist.
Must have:
- Python (Pandas, NumPy, Scikit-Learn)
- Experience with SQL
- Basic understanding of Machine Learning algorithms
- Good communication skills
Nice to have:
- Experience with AWS or Cloud deployment
- Knowledge of NLP",
    },
    JobDescription {
        key: "2",
        title: "Software Engineer",
        description: "We are looking for a Software Engineer.
Must have:
- Proficiency in Python, Java, or JavaScript
- Experience with web frameworks (Django, Flask, React, or Node.js)
- Understanding of RESTful APIs and microservices
- Version control with Git
- Database experience (SQL and NoSQL)
Nice to have:
- Cloud experience (AWS, GCP, or Azure)
- CI/CD pipeline experience
- Docker and Kubernetes",
    },
    JobDescription {
        key: "3",
        title: "Data Analyst",
        description: "We are looking for a Data Analyst.
Must have:
- Strong SQL skills
- Experience with Excel and data visualization tools (Tableau, Power BI)
- Python or R for data analysis
- Ability to create reports and dashboards
- Strong analytical and problem-solving skills
Nice to have:
- Experience with statistical analysis
- Knowledge of ETL processes",
    },
    JobDescription {
        key: "4",
        title: "Fintech Operations Specialist",
        description: "We are looking for a Fintech Operations Specialist.
Must have:
- Experience in financial services or fintech
- Strong SQL skills for transaction analysis
- Understanding of payment processing and compliance
- Experience with fraud detection or risk analysis
- Excellent communication and problem-solving skills
Nice to have:
- Experience with automation tools
- Knowledge of regulatory requirements (AML, KYC)
- Experience with data validation and quality assurance",
    },
    JobDescription {
        key: "5",
        title: "Product Manager",
        description: "We are looking for a Product Manager.
Must have:
- Experience defining product roadmaps and requirements
- Strong analytical skills and data-driven decision making
- Excellent communication with stakeholders
- Experience with Agile/Scrum methodology
- Ability to prioritize features and manage backlogs
Nice to have:
- Technical background or understanding
- Experience with user research and UX
- SQL or data analysis skills",
    },
    JobDescription {
        key: "6",
        title: "Customer Success Manager",
        description: "We are looking for a Customer Success Manager.
Must have:
- Experience in customer-facing roles
- Strong communication and relationship-building skills
- Ability to understand customer needs and provide solutions
- Experience with CRM tools (Salesforce, HubSpot)
- Track record of improving customer satisfaction
Nice to have:
- Technical product knowledge
- Experience with data analysis for customer insights
- Upselling and cross-selling experience",
    },
];

pub fn find(key: &str) -> Option<&'static JobDescription> {
    CATALOG.iter().find(|job| job.key == key.trim())
}

pub fn default_job() -> &'static JobDescription {
    find(DEFAULT_KEY).unwrap_or(&CATALOG[0])
}

pub fn build_job_description_prompt(role_title: &str) -> String {
    JOB_DESCRIPTION_PROMPT_TEMPLATE.replace("{role_title}", role_title)
}

/// Asks the model to write a job description for `role_title`.
pub async fn generate_job_description(
    model: &dyn LanguageModel,
    role_title: &str,
) -> Result<String, LlmError> {
    let prompt = build_job_description_prompt(role_title);
    let text = model.generate(&prompt).await?;
    Ok(text.trim().to_string())
}
