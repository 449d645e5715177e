/// Either half of a ring walk: the clockwise and counter-clockwise walks
/// chain different skiplist ranges, so their iterator types differ.
pub(crate) enum RingWalk<T, U> {
    Clockwise(T),
    CounterClockwise(U),
}

impl<T, U, V> Iterator for RingWalk<T, U>
where
    T: Iterator<Item = V>,
    U: Iterator<Item = V>,
{
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Clockwise(iter) => iter.next(),
            Self::CounterClockwise(iter) => iter.next(),
        }
    }
}
