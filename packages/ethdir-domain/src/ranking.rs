use std::cmp::Ordering;

/// A row that can be placed in directory ranking order.
pub trait Ranked {
	fn rank_id(&self) -> &str;

	fn rank_score(&self) -> f64;
}

/// Score descending, then id ascending.
pub fn rank_order<T: Ranked>(a: &T, b: &T) -> Ordering {
	b.rank_score().total_cmp(&a.rank_score()).then_with(|| a.rank_id().cmp(b.rank_id()))
}

pub fn sort_ranked<T: Ranked>(items: &mut [T]) {
	if !is_ranked(items) {
		items.sort_by(rank_order);
	}
}

pub fn is_ranked<T: Ranked>(items: &[T]) -> bool {
	items.windows(2).all(|pair| rank_order(&pair[0], &pair[1]) != Ordering::Greater)
}
