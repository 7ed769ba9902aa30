use super::{Checker, FieldErrors};
use crate::models::claims::ClaimForm;
use crate::models::ratings::{RatingDraft, RatingForm};
use crate::models::auth::{ProfileDraft, ProfileForm};

pub fn validate_rating(form: &RatingForm) -> Result<RatingDraft, FieldErrors> {
    let mut check = Checker::new();

    let rating = if form.rating.trim().is_empty() {
        check.fail("rating", "Please choose a rating");
        None
    } else {
        check.number("rating", "Rating", &form.rating, 1i16..=5).flatten()
    };
    let comment = check.optional_text("comment", "Comment", &form.comment, 1000);
    let comment_ok = comment.is_some() || form.comment.trim().is_empty();

    check.finish(|| {
        comment_ok.then_some(())?;
        Some(RatingDraft {
            rating: rating?,
            comment,
        })
    })
}

/// Claim message is optional; returns the normalized message.
pub fn validate_claim(form: &ClaimForm) -> Result<Option<String>, FieldErrors> {
    let mut check = Checker::new();
    let message = check.optional_text("message", "Message", &form.message, 1000);
    check.finish(|| Some(message))
}

pub fn validate_profile(form: &ProfileForm) -> Result<ProfileDraft, FieldErrors> {
    let mut check = Checker::new();

    let display_name = if form.display_name.trim().is_empty() {
        Some(None)
    } else {
        check
            .required_text("display_name", "Display name", &form.display_name, 2..=100)
            .map(Some)
    };
    let avatar_url = check.url("avatar_url", "Avatar", &form.avatar_url);

    check.finish(|| {
        Some(ProfileDraft {
            display_name: display_name?,
            avatar_url: avatar_url?,
        })
    })
}
