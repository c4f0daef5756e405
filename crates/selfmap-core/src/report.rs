use std::fmt;

use serde::Serialize;

use crate::category::Category;
use crate::degree::compute_weighted_degrees;
use crate::model::{Dataset, Relation};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
    pub mean_power: f64,
    pub mean_valence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub degree: f64,
}

/// Aggregate view of a dataset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub entries: usize,
    pub associations: usize,
    pub categories: Vec<CategorySummary>,
    pub relations: Vec<(Relation, usize)>,
    pub mean_power: f64,
    pub mean_valence: f64,
    /// Highest weighted degree first; ties broken by label.
    pub top_connected: Vec<RankedEntry>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Summarize `dataset`, listing up to `top_k` most connected entries.
/// Entries with zero degree are never listed.
pub fn build_report(dataset: &Dataset, top_k: usize) -> Report {
    let categories = Category::ALL
        .iter()
        .map(|&category| {
            let members = move || dataset.entries.iter().filter(move |e| e.category == category);
            CategorySummary {
                category,
                count: members().count(),
                mean_power: mean(members().map(|e| e.power)),
                mean_valence: mean(members().map(|e| e.valence)),
            }
        })
        .collect();

    let relations = Relation::ALL
        .iter()
        .map(|&r| {
            let n = dataset
                .associations
                .iter()
                .filter(|a| a.relation == r)
                .count();
            (r, n)
        })
        .collect();

    let mut ranked: Vec<RankedEntry> =
        compute_weighted_degrees(&dataset.entries, &dataset.associations)
            .into_iter()
            .filter(|(_, degree)| *degree > 0.0)
            .map(|(label, degree)| RankedEntry { label, degree })
            .collect();
    ranked.sort_by(|a, b| {
        b.degree
            .total_cmp(&a.degree)
            .then_with(|| a.label.cmp(&b.label))
    });
    ranked.truncate(top_k);

    Report {
        entries: dataset.entries.len(),
        associations: dataset.associations.len(),
        categories,
        relations,
        mean_power: mean(dataset.entries.iter().map(|e| e.power)),
        mean_valence: mean(dataset.entries.iter().map(|e| e.valence)),
        top_connected: ranked,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "entries:      {}", self.entries)?;
        writeln!(f, "associations: {}", self.associations)?;
        writeln!(f, "mean power:   {:.2}", self.mean_power)?;
        writeln!(f, "mean valence: {:+.2}", self.mean_valence)?;
        writeln!(f)?;
        for c in &self.categories {
            writeln!(
                f,
                "{:<16} n={:<3} power={:.2} valence={:+.2}",
                c.category.as_str(),
                c.count,
                c.mean_power,
                c.mean_valence
            )?;
        }
        writeln!(f)?;
        for (relation, n) in &self.relations {
            writeln!(f, "{:<16} {n}", relation.as_str())?;
        }
        if !self.top_connected.is_empty() {
            writeln!(f)?;
            writeln!(f, "most connected:")?;
            for r in &self.top_connected {
                writeln!(f, "  {:<20} {:.2}", r.label, r.degree)?;
            }
        }
        Ok(())
    }
}
