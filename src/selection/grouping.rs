use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::bullet::Bullet;
use crate::types::identifiers::GroupKey;

/// `relevance_score >= min_score`. A NaN threshold admits nothing.
#[inline]
pub fn passes_threshold(bullet: &Bullet, min_score: f64) -> bool {
    bullet.relevance_score() >= min_score
}

/// Group bullets by company, dropping those below `min_score`.
///
/// Within a group, bullets keep their input order. Groups with no
/// qualifying bullet never appear.
pub fn partition_by_company<I>(bullets: I, min_score: f64) -> BTreeMap<GroupKey, Vec<Bullet>>
where
    I: IntoIterator<Item = Bullet>,
{
    let mut groups: BTreeMap<GroupKey, Vec<Bullet>> = BTreeMap::new();
    for bullet in bullets {
        if !passes_threshold(&bullet, min_score) {
            continue;
        }
        groups.entry(bullet.company().clone()).or_default().push(bullet);
    }
    groups
}

/// Stable sort, highest score first. Ties keep their relative order.
pub fn sort_by_score_desc(bullets: &mut [Bullet]) {
    bullets.sort_by(|a, b| {
        b.relevance_score()
            .partial_cmp(&a.relevance_score())
            .unwrap_or(Ordering::Equal)
    });

    debug_assert!(bullets
        .windows(2)
        .all(|w| w[0].relevance_score() >= w[1].relevance_score()));
}
