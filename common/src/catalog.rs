// Catalog sources for job postings
// The catalog is read once at startup and never modified afterwards.

use crate::errors::CatalogError;
use crate::models::{Job, JobStatus};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Source of the job catalog
pub trait JobSource: Send + Sync {
    /// Return every job in the catalog, in catalog order
    fn list_all(&self) -> Result<Vec<Job>, CatalogError>;
}

/// Built-in catalog of ten sample postings
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl JobSource for StaticCatalog {
    fn list_all(&self) -> Result<Vec<Job>, CatalogError> {
        Ok(seed_jobs())
    }
}

/// Catalog loaded from a JSON array of job records
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JobSource for JsonFileCatalog {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn list_all(&self) -> Result<Vec<Job>, CatalogError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| CatalogError::ReadFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let jobs: Vec<Job> = serde_json::from_str(&raw)?;
        validate_catalog(&jobs)?;

        info!(job_count = jobs.len(), "Loaded job catalog from file");
        Ok(jobs)
    }
}

/// Check that every job has a non-empty id and that ids are unique
pub fn validate_catalog(jobs: &[Job]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for (position, job) in jobs.iter().enumerate() {
        if job.id.is_empty() {
            return Err(CatalogError::EmptyId(position));
        }
        if !seen.insert(job.id.as_str()) {
            return Err(CatalogError::DuplicateId(job.id.clone()));
        }
    }
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Seed dates are literals below and always valid
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn seed_job(
    id: &str,
    title: &str,
    company: &str,
    description: &str,
    budget: u32,
    skills: &[&str],
    deadline: NaiveDate,
    status: JobStatus,
    applicants: u32,
    posted_date: NaiveDate,
) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        description: description.to_string(),
        budget,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        deadline,
        status,
        applicants,
        posted_date,
    }
}

fn seed_jobs() -> Vec<Job> {
    vec![
        seed_job(
            "1",
            "Mobile App UI Design",
            "TechStartup Inc",
            "Design a modern, user-friendly mobile application interface for our fitness tracking app. We need 5-8 screens including onboarding, dashboard, and settings.",
            800,
            &["UI Design", "Figma", "Mobile Design"],
            date(2025, 1, 15),
            JobStatus::Open,
            3,
            date(2025, 1, 2),
        ),
        seed_job(
            "2",
            "React Component Library",
            "Digital Agency Co",
            "Build a reusable React component library with 20+ components. Must include documentation and Storybook integration.",
            1500,
            &["React", "JavaScript", "CSS"],
            date(2025, 2, 1),
            JobStatus::Open,
            5,
            date(2025, 1, 1),
        ),
        seed_job(
            "3",
            "Content Writing - Blog Posts",
            "Marketing Hub",
            "Write 10 SEO-optimized blog posts (1000-1500 words each) on technology trends. Topics will be provided.",
            500,
            &["Content Writing", "SEO", "Research"],
            date(2025, 1, 20),
            JobStatus::Open,
            8,
            date(2024, 12, 28),
        ),
        seed_job(
            "4",
            "Database Optimization",
            "Enterprise Solutions",
            "Optimize our PostgreSQL database queries and schema. Performance improvement target: 40% faster queries.",
            1200,
            &["SQL", "PostgreSQL", "Database Design"],
            date(2025, 1, 25),
            JobStatus::Assigned,
            2,
            date(2024, 12, 30),
        ),
        seed_job(
            "5",
            "Logo & Branding Design",
            "Startup Studio",
            "Create a complete brand identity including logo, color palette, and typography guidelines for a new fintech startup.",
            600,
            &["Graphic Design", "Branding", "Adobe Creative Suite"],
            date(2025, 1, 18),
            JobStatus::Open,
            4,
            date(2025, 1, 3),
        ),
        seed_job(
            "6",
            "Python Data Analysis Project",
            "Analytics Firm",
            "Analyze customer behavior data using Python. Create visualizations and a comprehensive report with insights.",
            900,
            &["Python", "Data Analysis", "Pandas", "Matplotlib"],
            date(2025, 2, 5),
            JobStatus::Open,
            6,
            date(2024, 12, 29),
        ),
        seed_job(
            "7",
            "WordPress Theme Development",
            "Web Design Studio",
            "Develop a custom WordPress theme with WooCommerce integration. Must be responsive and SEO-friendly.",
            1100,
            &["WordPress", "PHP", "JavaScript"],
            date(2025, 2, 10),
            JobStatus::Open,
            3,
            date(2025, 1, 2),
        ),
        seed_job(
            "8",
            "Video Editing - Product Demo",
            "SaaS Company",
            "Edit and produce a 3-5 minute product demo video. Must include motion graphics and background music.",
            700,
            &["Video Editing", "Motion Graphics", "Adobe Premiere"],
            date(2025, 1, 22),
            JobStatus::Completed,
            1,
            date(2024, 12, 25),
        ),
        seed_job(
            "9",
            "API Development - REST API",
            "FinTech Startup",
            "Build a RESTful API for payment processing. Must include authentication, error handling, and comprehensive documentation.",
            1400,
            &["Node.js", "Express", "REST API", "MongoDB"],
            date(2025, 2, 15),
            JobStatus::Open,
            7,
            date(2024, 12, 31),
        ),
        seed_job(
            "10",
            "Social Media Strategy",
            "E-commerce Brand",
            "Create a 3-month social media strategy and content calendar for Instagram and TikTok. Include competitor analysis.",
            450,
            &["Social Media Marketing", "Content Strategy", "Analytics"],
            date(2025, 1, 17),
            JobStatus::Open,
            9,
            date(2025, 1, 3),
        ),
    ]
}
