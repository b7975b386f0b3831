use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::classifier::Category;
use crate::turns::{round_to, Turn};

pub const SUMMARY_NOTES: &str =
    "Time per turn capped; tokens are character-based estimates (chars/4).";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CategoryTotals {
    pub mins: f64,
    pub mins_share: f64,
    pub tokens: u64,
    pub tokens_share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GrandTotals {
    pub mins: f64,
    pub tokens: u64,
}

/// Per-category totals, kept in [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown([(Category, CategoryTotals); 4]);

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> &CategoryTotals {
        // Discriminants follow `Category::ALL`.
        &self.0[category as usize].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryTotals)> {
        self.0.iter().map(|(category, totals)| (*category, totals))
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, totals) in &self.0 {
            map.serialize_entry(category.as_str(), totals)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub totals: CategoryBreakdown,
    pub grand: GrandTotals,
    pub notes: &'static str,
}

/// Sums rounded per-turn minutes and token estimates by category.
pub fn summarize(turns: &[Turn]) -> Summary {
    let mut sums = Category::ALL.map(|category| (category, 0.0_f64, 0_u64));
    for turn in turns {
        let slot = &mut sums[turn.category as usize];
        slot.1 += turn.duration_minutes();
        slot.2 += turn.tokens_est;
    }

    let grand_mins: f64 = sums.iter().map(|(_, mins, _)| mins).sum();
    let grand_tokens: u64 = sums.iter().map(|(_, _, tokens)| tokens).sum();

    let totals = sums.map(|(category, mins, tokens)| {
        (
            category,
            CategoryTotals {
                mins: round_to(mins, 2),
                mins_share: round_to(share(mins, grand_mins), 1),
                tokens,
                tokens_share: round_to(share(tokens as f64, grand_tokens as f64), 1),
            },
        )
    });

    Summary {
        totals: CategoryBreakdown(totals),
        grand: GrandTotals {
            mins: round_to(grand_mins, 2),
            tokens: grand_tokens,
        },
        notes: SUMMARY_NOTES,
    }
}

fn share(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}
