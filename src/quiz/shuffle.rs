use rand::Rng;

/// Fisher-Yates over a copy of `items`. The input is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
