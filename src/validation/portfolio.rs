use super::{Checker, FieldErrors, is_web_url};
use crate::models::portfolio::{PortfolioDraft, PortfolioForm};

pub const MAX_SKILLS: usize = 20;
pub const MAX_CATEGORIES: usize = 10;
pub const MAX_FILES: usize = 20;

/// Validate a portfolio setup or edit form in declaration order.
pub fn validate_portfolio(form: &PortfolioForm) -> Result<PortfolioDraft, FieldErrors> {
    let mut check = Checker::new();

    let title = check.required_text("title", "Title", &form.title, 3..=100);
    let bio = check.optional_text("bio", "Bio", &form.bio, 1000);
    let bio_ok = bio.is_some() || form.bio.trim().is_empty();

    let skills = check.list("skills", "skills", &form.skills, MAX_SKILLS, 1..=50);
    let categories = check.list("categories", "categories", &form.categories, MAX_CATEGORIES, 1..=50);

    let hourly_rate = check.number("hourly_rate", "Hourly rate", &form.hourly_rate, 0.0..=10_000.0);
    let experience_years =
        check.number("experience_years", "Years of experience", &form.experience_years, 0..=80);

    let location = check.optional_text("location", "Location", &form.location, 100);
    let location_ok = location.is_some() || form.location.trim().is_empty();

    let file_urls = if form.file_urls.len() > MAX_FILES {
        check.fail("file_urls", format!("You can attach at most {MAX_FILES} files"));
        None
    } else if form.file_urls.iter().any(|u| !is_web_url(u.trim())) {
        check.fail("file_urls", "Every attached file must be a valid URL");
        None
    } else {
        Some(form.file_urls.iter().map(|u| u.trim().to_string()).collect())
    };

    check.finish(|| {
        (bio_ok && location_ok).then_some(())?;
        Some(PortfolioDraft {
            title: title?,
            bio,
            skills: skills?,
            categories: categories?,
            hourly_rate: hourly_rate?,
            experience_years: experience_years?,
            location,
            is_published: form.is_published,
            file_urls: file_urls?,
        })
    })
}
