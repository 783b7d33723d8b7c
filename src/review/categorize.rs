use crate::model::card::Card;

pub const PLANNED_DONE: &str = "Planned / Done";
pub const PLANNED_NOT_DONE: &str = "Planned / Not Done";
pub const UNPLANNED_DONE: &str = "Unplanned / Done";

/// Checked in this order, first hit wins.
pub const MARKERS: [(&str, Category); 3] = [
    (PLANNED_DONE, Category::PlannedDone),
    (PLANNED_NOT_DONE, Category::PlannedNotDone),
    (UNPLANNED_DONE, Category::UnplannedDone),
];

pub const WENT_WELL: &str = "What went well";
pub const BE_BETTER: &str = "What didn't go well";
pub const NEED_HELP: &str = "Where do I need help";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PlannedDone,
    PlannedNotDone,
    UnplannedDone,
    Other,
}

/// Plain substring test over the joined label names, so a label that merely
/// embeds a marker phrase still counts.
pub fn classify(card: &Card) -> Category {
    let text = card.label_text();
    MARKERS
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub planned_done: Vec<Card>,
    pub planned_not_done: Vec<Card>,
    pub unplanned_done: Vec<Card>,
    pub other: Vec<Card>,
}

impl Buckets {
    pub fn len(&self) -> usize {
        self.planned_done.len()
            + self.planned_not_done.len()
            + self.unplanned_done.len()
            + self.other.len()
    }
}

/// Relative input order is kept inside every bucket.
pub fn partition(cards: Vec<Card>) -> Buckets {
    let mut buckets = Buckets::default();
    for card in cards {
        let bucket = match classify(&card) {
            Category::PlannedDone => &mut buckets.planned_done,
            Category::PlannedNotDone => &mut buckets.planned_not_done,
            Category::UnplannedDone => &mut buckets.unplanned_done,
            Category::Other => &mut buckets.other,
        };
        bucket.push(card);
    }
    buckets
}

/// Pull the first card titled exactly `title` out of `other` and return its
/// description. The remaining cards keep their order. Absent title gives "".
pub fn extract_reflection(mut other: Vec<Card>, title: &str) -> (String, Vec<Card>) {
    match other.iter().position(|card| card.name == title) {
        Some(idx) => {
            let card = other.remove(idx);
            (card.description, other)
        }
        None => (String::new(), other),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reflections {
    pub went_well: String,
    pub be_better: String,
    pub need_help: String,
}

/// A categorized week: the four buckets with the reflection cards taken out of `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Review {
    pub buckets: Buckets,
    pub reflections: Reflections,
}

impl Review {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut buckets = partition(cards);

        let (need_help, other) = extract_reflection(std::mem::take(&mut buckets.other), NEED_HELP);
        let (be_better, other) = extract_reflection(other, BE_BETTER);
        let (went_well, other) = extract_reflection(other, WENT_WELL);
        buckets.other = other;

        Self {
            buckets,
            reflections: Reflections {
                went_well,
                be_better,
                need_help,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, labels: &[&str]) -> Card {
        Card {
            name: name.to_string(),
            description: String::new(),
            label_ids: Vec::new(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn with_desc(name: &str, description: &str) -> Card {
        Card {
            description: description.to_string(),
            ..card(name, &[])
        }
    }

    fn names(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn classify_each_marker() {
        assert_eq!(classify(&card("a", &["Planned / Done"])), Category::PlannedDone);
        assert_eq!(
            classify(&card("b", &["Planned / Not Done"])),
            Category::PlannedNotDone
        );
        assert_eq!(
            classify(&card("c", &["Unplanned / Done"])),
            Category::UnplannedDone
        );
    }

    #[test]
    fn classify_first_match_wins() {
        let c = card("a", &["Unplanned / Done", "Planned / Done"]);
        assert_eq!(classify(&c), Category::PlannedDone);
    }

    #[test]
    fn classify_no_marker_is_other() {
        assert_eq!(classify(&card("a", &[])), Category::Other);
        assert_eq!(classify(&card("b", &["backend", ""])), Category::Other);
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(classify(&card("a", &["planned / done"])), Category::Other);
    }

    #[test]
    fn classify_matches_embedded_marker() {
        let c = card("a", &["Not Planned / Done really"]);
        assert_eq!(classify(&c), Category::PlannedDone);
    }

    #[test]
    fn partition_conserves_cards_and_order() {
        let cards = vec![
            card("A", &["Planned / Done"]),
            card("B", &["Planned / Not Done"]),
            card("C", &[]),
            card("D", &["Planned / Done", "backend"]),
            card("E", &["misc"]),
        ];
        let buckets = partition(cards);
        assert_eq!(buckets.len(), 5);
        assert_eq!(names(&buckets.planned_done), vec!["A", "D"]);
        assert_eq!(names(&buckets.planned_not_done), vec!["B"]);
        assert!(buckets.unplanned_done.is_empty());
        assert_eq!(names(&buckets.other), vec!["C", "E"]);
    }

    #[test]
    fn partition_empty_input() {
        let buckets = partition(Vec::new());
        assert_eq!(buckets.len(), 0);
        assert_eq!(buckets, Buckets::default());
    }

    #[test]
    fn extract_reflection_removes_card() {
        let other = vec![with_desc("What went well", "Shipped X"), card("Task Z", &[])];
        let (text, rest) = extract_reflection(other, WENT_WELL);
        assert_eq!(text, "Shipped X");
        assert_eq!(names(&rest), vec!["Task Z"]);
    }

    #[test]
    fn extract_reflection_absent_title_is_noop() {
        let other = vec![card("Task Z", &[]), card("Task Y", &[])];
        let (text, rest) = extract_reflection(other.clone(), NEED_HELP);
        assert_eq!(text, "");
        assert_eq!(rest, other);
    }

    #[test]
    fn extract_reflection_is_exact_match() {
        let other = vec![with_desc("what went well", "nope")];
        let (text, rest) = extract_reflection(other, WENT_WELL);
        assert_eq!(text, "");
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn extract_reflection_takes_only_one_duplicate() {
        let other = vec![
            with_desc("Where do I need help", "first"),
            with_desc("Where do I need help", "second"),
        ];
        let (text, rest) = extract_reflection(other, NEED_HELP);
        assert_eq!(text, "first");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].description, "second");
    }

    #[test]
    fn review_pulls_all_three_reflections() {
        let cards = vec![
            card("A", &["Planned / Done"]),
            with_desc("What went well", "Shipped X"),
            card("Task Z", &[]),
            with_desc("What didn't go well", "Slow CI"),
            with_desc("Where do I need help", "Reviews"),
        ];
        let review = Review::from_cards(cards);
        assert_eq!(names(&review.buckets.planned_done), vec!["A"]);
        assert_eq!(names(&review.buckets.other), vec!["Task Z"]);
        assert_eq!(review.reflections.went_well, "Shipped X");
        assert_eq!(review.reflections.be_better, "Slow CI");
        assert_eq!(review.reflections.need_help, "Reviews");
    }

    #[test]
    fn review_leaves_labelled_sentinel_in_its_bucket() {
        // Only the catch-all bucket is searched for reflection cards.
        let mut c = with_desc("What went well", "Shipped X");
        c.labels = vec!["Planned / Done".into()];
        let review = Review::from_cards(vec![c]);
        assert_eq!(review.buckets.planned_done.len(), 1);
        assert_eq!(review.reflections.went_well, "");
    }

    #[test]
    fn review_of_empty_board() {
        let review = Review::from_cards(Vec::new());
        assert_eq!(review, Review::default());
    }
}
