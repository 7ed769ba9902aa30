use regex::Regex;
use std::sync::LazyLock;

use super::{Checker, FieldErrors};
use crate::models::projects::{Budget, LocationType, ProjectDraft, ProjectForm, Timeline};

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 .\-]+$").expect("project name pattern"));

static INSTAGRAM_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?[A-Za-z0-9._]{1,30}$").expect("instagram pattern"));

pub const MAX_TAGS: usize = 10;
pub const MAX_CREATOR_TYPES: usize = 10;

/// Validate a project form in declaration order.
pub fn validate_project(form: &ProjectForm) -> Result<ProjectDraft, FieldErrors> {
    let mut check = Checker::new();

    let project_name = check
        .required_text("project_name", "Project name", &form.project_name, 3..=100)
        .and_then(|name| {
            if PROJECT_NAME.is_match(&name) {
                Some(name)
            } else {
                check.fail(
                    "project_name",
                    "Project name can only contain letters, numbers, spaces, hyphens and periods",
                );
                None
            }
        });

    let description = check.required_text("description", "Description", &form.description, 20..=2000);

    let location_type = check.choice(
        "location_type",
        "Location type",
        &form.location_type,
        parse_location_type,
    );

    let location = check.optional_text("location", "Location", &form.location, 100);
    if location_type == Some(LocationType::OnSite) && location.is_none() && form.location.trim().is_empty() {
        check.fail("location", "Location is required for on-site projects");
    }

    let budget = check.choice("budget", "Budget", &form.budget, parse_budget);
    let timeline = check.choice("timeline", "Timeline", &form.timeline, parse_timeline);

    let creator_types = check
        .list("creator_types", "creator types", &form.creator_types, MAX_CREATOR_TYPES, 2..=50)
        .and_then(|types| {
            if types.is_empty() {
                check.fail("creator_types", "Please choose at least one creator type");
                None
            } else {
                Some(types)
            }
        });

    let tags = check.list("tags", "tags", &form.tags, MAX_TAGS, 2..=30);

    let contact_email = check.email("contact_email", &form.contact_email);
    let contact_linkedin = check.url("contact_linkedin", "LinkedIn", &form.contact_linkedin);
    let contact_instagram = instagram(&mut check, &form.contact_instagram);

    let no_contact = [
        &form.contact_email,
        &form.contact_linkedin,
        &form.contact_instagram,
    ]
    .iter()
    .all(|c| c.trim().is_empty());
    if no_contact {
        check.fail(
            "contact_email",
            "Please provide at least one contact method (email, LinkedIn or Instagram)",
        );
    }

    check.finish(|| {
        Some(ProjectDraft {
            project_name: project_name?,
            description: description?,
            location,
            location_type: location_type?,
            budget: budget?,
            timeline: timeline?,
            creator_types: creator_types?,
            tags: tags?,
            contact_email: contact_email?,
            contact_linkedin: contact_linkedin?,
            contact_instagram: contact_instagram?,
        })
    })
}

fn instagram(check: &mut Checker, raw: &str) -> Option<Option<String>> {
    let value = raw.trim();
    if value.is_empty() {
        return Some(None);
    }
    if !INSTAGRAM_HANDLE.is_match(value) {
        check.fail("contact_instagram", "Please enter a valid Instagram handle");
        return None;
    }
    Some(Some(value.trim_start_matches('@').to_string()))
}

pub fn parse_location_type(value: &str) -> Option<LocationType> {
    match value.to_ascii_lowercase().as_str() {
        "on_site" | "on-site" | "onsite" => Some(LocationType::OnSite),
        "remote" => Some(LocationType::Remote),
        _ => None,
    }
}

pub fn parse_budget(value: &str) -> Option<Budget> {
    match value {
        "under_500" => Some(Budget::Under500),
        "500_1000" => Some(Budget::From500To1000),
        "1000_5000" => Some(Budget::From1000To5000),
        "5000_10000" => Some(Budget::From5000To10000),
        "over_10000" => Some(Budget::Over10000),
        _ => None,
    }
}

pub fn parse_timeline(value: &str) -> Option<Timeline> {
    match value {
        "less_than_1_week" => Some(Timeline::LessThanOneWeek),
        "1_2_weeks" => Some(Timeline::OneToTwoWeeks),
        "2_4_weeks" => Some(Timeline::TwoToFourWeeks),
        "1_3_months" => Some(Timeline::OneToThreeMonths),
        "over_3_months" => Some(Timeline::OverThreeMonths),
        _ => None,
    }
}
