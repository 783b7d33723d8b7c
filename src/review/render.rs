use std::fmt::Write;

use tracing::info;

use super::categorize::{
    Review, BE_BETTER, MARKERS, NEED_HELP, PLANNED_NOT_DONE, UNPLANNED_DONE, WENT_WELL,
};
use crate::error::ReviewError;
use crate::model::card::Card;
use crate::model::message::{icon_emoji, Attachment, Message};

const TITLE: &str = "Weekly Review";
const OTHER_TASKS: &str = "Other tasks";
const PLANNED_DONE_INTRO: &str = "Tasks I planned for this week and finished";
const PLANNED_NOT_DONE_INTRO: &str = "Tasks I planned for this week but did not finish";
const UNPLANNED_DONE_INTRO: &str = "Tasks I did not plan for but finished anyway";

const HEADER_COLOR: &str = "0C31EA";
const CARD_COLOR: &str = "4B0040";

/// The rendered artifact handed to a delivery target.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Text(String),
    Message(Message),
}

/// Turns the fetched cards into a report.
pub trait ReportStyle: Send + Sync {
    fn name(&self) -> &str;
    fn render(&self, cards: Vec<Card>) -> Result<Report, ReviewError>;
}

/// Categorized five-part document with the reflection answers at the bottom.
pub struct TemplateStyle;

impl ReportStyle for TemplateStyle {
    fn name(&self) -> &str {
        "template"
    }

    fn render(&self, cards: Vec<Card>) -> Result<Report, ReviewError> {
        let review = Review::from_cards(cards);
        let buckets = &review.buckets;
        info!(
            total = buckets.len(),
            planned_done = buckets.planned_done.len(),
            planned_not_done = buckets.planned_not_done.len(),
            unplanned_done = buckets.unplanned_done.len(),
            other = buckets.other.len(),
            "categorized cards"
        );
        Ok(Report::Text(render_template(&review)?))
    }
}

pub fn render_template(review: &Review) -> Result<String, ReviewError> {
    let mut out = String::new();
    let buckets = &review.buckets;

    writeln!(out, "{TITLE}")?;
    write_section(
        &mut out,
        "Planned Done",
        Some(PLANNED_DONE_INTRO),
        &buckets.planned_done,
    )?;
    write_section(
        &mut out,
        PLANNED_NOT_DONE,
        Some(PLANNED_NOT_DONE_INTRO),
        &buckets.planned_not_done,
    )?;
    write_section(
        &mut out,
        UNPLANNED_DONE,
        Some(UNPLANNED_DONE_INTRO),
        &buckets.unplanned_done,
    )?;
    write_section(&mut out, OTHER_TASKS, None, &buckets.other)?;

    let reflections = &review.reflections;
    writeln!(out, "{WENT_WELL}\n{}\n", reflections.went_well)?;
    writeln!(out, "{BE_BETTER}\n{}\n", reflections.be_better)?;
    writeln!(out, "{NEED_HELP}\n{}", reflections.need_help)?;

    Ok(out)
}

fn write_section(
    out: &mut String,
    heading: &str,
    intro: Option<&str>,
    cards: &[Card],
) -> std::fmt::Result {
    writeln!(out, "{heading}")?;
    if let Some(intro) = intro {
        writeln!(out, "{intro}")?;
    }
    for card in cards {
        let labels = display_labels(card);
        if labels.is_empty() {
            writeln!(out, "- {}", card.name)?;
        } else {
            writeln!(out, "- {} ({labels})", card.name)?;
        }
    }
    Ok(())
}

/// Label names as shown to the reader: category markers removed, blanks dropped.
pub fn display_labels(card: &Card) -> String {
    card.labels
        .iter()
        .map(|label| {
            MARKERS
                .iter()
                .fold(label.clone(), |acc, (marker, _)| acc.replace(marker, ""))
                .trim()
                .to_string()
        })
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flat webhook rendering: one header attachment, then one per card in fetch order.
/// Labels are shown raw and no reflection cards are pulled out.
pub struct AttachmentStyle {
    pub list: String,
    pub channel: String,
    pub username: String,
    pub emoji: String,
}

impl ReportStyle for AttachmentStyle {
    fn name(&self) -> &str {
        "attachments"
    }

    fn render(&self, cards: Vec<Card>) -> Result<Report, ReviewError> {
        let ts = chrono::Utc::now().timestamp();

        let mut attachments = Vec::with_capacity(cards.len() + 1);
        attachments.push(Attachment {
            title: "Your weekly review".into(),
            text: format!(
                "These are the cards that appear in your {} list this week",
                self.list
            ),
            color: HEADER_COLOR.into(),
            ts,
            ..Default::default()
        });
        attachments.extend(cards.into_iter().map(|card| Attachment {
            title: format!("{}: [{}]", card.name, card.labels.join(" ")),
            fallback: card.name,
            text: card.description,
            color: CARD_COLOR.into(),
            ts,
            ..Default::default()
        }));

        Ok(Report::Message(Message {
            channel: self.channel.clone(),
            username: self.username.clone(),
            icon_emoji: icon_emoji(&self.emoji),
            text: None,
            attachments,
        }))
    }
}
