//! Rankings and distributions shared by the famous-places and top-places
//! tables. Everything is generic over [`Attraction`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::types::{Attraction, FamousPlace};
use crate::util::{argmax_by, argmin_by, mean_defined, safe_div, sum_defined};

pub const DEFAULT_TOP_N: usize = 5;

/// `rating * reviews`; `None` unless both are known.
pub fn popularity_score<P: Attraction>(place: &P) -> Option<f64> {
    Some(place.rating()? * place.review_count_lakhs()?)
}

/// Entrance fee paid per rating point. A zero rating or a negative fee has no
/// value score.
pub fn value_score<P: Attraction>(place: &P) -> Option<f64> {
    let fee = place.entrance_fee_inr().filter(|f| *f >= 0.0);
    safe_div(fee, place.rating())
}

/// Reviews (in lakhs) per hour of visit. A zero duration has no efficiency.
pub fn time_efficiency<P: Attraction>(place: &P) -> Option<f64> {
    safe_div(place.review_count_lakhs(), place.time_needed_hours())
}

#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a, P> {
    pub place: &'a P,
    pub score: f64,
}

/// The `n` places with the highest popularity score, best first.
///
/// Places without a score are left out; equal scores keep input order.
pub fn top_by_popularity<P: Attraction>(places: &[P], n: usize) -> Vec<Ranked<'_, P>> {
    let mut scored: Vec<Ranked<'_, P>> = places
        .iter()
        .filter_map(|p| popularity_score(p).map(|score| Ranked { place: p, score }))
        .collect();
    // `sort_by` is stable, so ties stay in table order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(n);
    debug!(kept = scored.len(), "popularity ranking computed");
    scored
}

pub fn best_value<P: Attraction>(places: &[P]) -> Option<Ranked<'_, P>> {
    argmin_by(places, value_score::<P>).map(|(i, score)| Ranked { place: &places[i], score })
}

pub fn most_time_efficient<P: Attraction>(places: &[P]) -> Option<Ranked<'_, P>> {
    argmax_by(places, time_efficiency::<P>).map(|(i, score)| Ranked { place: &places[i], score })
}

pub fn highest_rated<P: Attraction>(places: &[P]) -> Option<Ranked<'_, P>> {
    argmax_by(places, |p| p.rating()).map(|(i, score)| Ranked { place: &places[i], score })
}

pub fn most_reviewed<P: Attraction>(places: &[P]) -> Option<Ranked<'_, P>> {
    argmax_by(places, |p| p.review_count_lakhs()).map(|(i, score)| Ranked { place: &places[i], score })
}

pub fn average_rating<P: Attraction>(places: &[P]) -> Option<f64> {
    mean_defined(places.iter().map(|p| p.rating()))
}

pub fn total_reviews<P: Attraction>(places: &[P]) -> f64 {
    sum_defined(places.iter().map(|p| p.review_count_lakhs()))
}

/// Entrance fee ranges, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FeeBucket {
    Free,
    UpTo100,
    UpTo500,
    Over500,
}

impl FeeBucket {
    pub const ALL: [FeeBucket; 4] = [
        FeeBucket::Free,
        FeeBucket::UpTo100,
        FeeBucket::UpTo500,
        FeeBucket::Over500,
    ];

    /// Bucket for a fee. Negative or missing fees belong to no bucket.
    pub fn classify(fee: Option<f64>) -> Option<FeeBucket> {
        let fee = fee?;
        if fee < 0.0 {
            None
        } else if fee == 0.0 {
            Some(FeeBucket::Free)
        } else if fee <= 100.0 {
            Some(FeeBucket::UpTo100)
        } else if fee <= 500.0 {
            Some(FeeBucket::UpTo500)
        } else {
            Some(FeeBucket::Over500)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeeBucket::Free => "Free",
            FeeBucket::UpTo100 => "₹1–100",
            FeeBucket::UpTo500 => "₹101–500",
            FeeBucket::Over500 => "₹500+",
        }
    }
}

impl fmt::Display for FeeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Place count per fee bucket, every bucket listed in order.
pub fn fee_distribution<P: Attraction>(places: &[P]) -> Vec<(FeeBucket, usize)> {
    let mut counts = [0usize; 4];
    for bucket in places.iter().filter_map(|p| FeeBucket::classify(p.entrance_fee_inr())) {
        counts[bucket as usize] += 1;
    }
    FeeBucket::ALL.iter().copied().zip(counts).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub place_type: String,
    pub places: usize,
    pub avg_rating: Option<f64>,
    pub total_reviews_lakhs: f64,
}

/// Per-type mean rating and total reviews, sorted by type name.
pub fn category_summary<P: Attraction>(places: &[P]) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<&str, Vec<&P>> = BTreeMap::new();
    for p in places {
        groups.entry(p.place_type()).or_default().push(p);
    }
    groups
        .into_iter()
        .map(|(place_type, members)| CategorySummary {
            place_type: place_type.to_string(),
            places: members.len(),
            avg_rating: mean_defined(members.iter().map(|p| p.rating())),
            total_reviews_lakhs: sum_defined(members.iter().map(|p| p.review_count_lakhs())),
        })
        .collect()
}

/// Category with the best average rating.
pub fn most_popular_category(summary: &[CategorySummary]) -> Option<&CategorySummary> {
    argmax_by(summary, |c| c.avg_rating).map(|(i, _)| &summary[i])
}

/// Places whose name contains `query`, ignoring case. An empty or missing
/// query keeps every place.
pub fn search<'a, P: Attraction>(places: &'a [P], query: Option<&str>) -> Vec<&'a P> {
    match query {
        Some(q) if !q.is_empty() => {
            let needle = q.to_lowercase();
            places
                .iter()
                .filter(|p| p.name().to_lowercase().contains(&needle))
                .collect()
        }
        _ => places.iter().collect(),
    }
}

/// First place called `name`, if any.
pub fn find_by_name<'a, P: Attraction>(places: &'a [P], name: &str) -> Option<&'a P> {
    places.iter().find(|p| p.name() == name)
}

/// Number of places per `(zone, type)`, sorted by zone then type.
pub fn type_by_zone(places: &[FamousPlace]) -> Vec<(String, String, usize)> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for p in places {
        *counts.entry((p.zone.as_str(), p.place_type.as_str())).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((zone, ty), n)| (zone.to_string(), ty.to_string(), n))
        .collect()
}

/// Number of places per best visiting time, most common first.
pub fn best_time_distribution(places: &[FamousPlace]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for p in places {
        match counts.iter_mut().find(|(label, _)| *label == p.best_time_to_visit) {
            Some((_, n)) => *n += 1,
            None => counts.push((p.best_time_to_visit.clone(), 1)),
        }
    }
    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
