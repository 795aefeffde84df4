/// Owned sequence sorted in place by an iterative quicksort.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence<T> {
    elements: Vec<T>,
}

impl<T> Sequence<T>
where
    T: Ord,
{
    pub fn new(elements: Vec<T>) -> Self {
        Self { elements }
    }

    /// Replaces the held sequence wholesale.
    pub fn set(&mut self, elements: Vec<T>) {
        self.elements = elements;
    }

    pub fn get(&self) -> &[T] {
        &self.elements
    }

    pub fn into_inner(self) -> Vec<T> {
        self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Sorts ascending with Hoare partitioning around the middle element of
    /// each range. Pending ranges live on an explicit stack; not stable.
    pub fn sort(&mut self) {
        if self.elements.len() < 2 {
            return;
        }

        let mut ranges = vec![(0, self.elements.len() - 1)];

        while let Some((low, high)) = ranges.pop() {
            if low + 1 == high {
                if self.elements[low] > self.elements[high] {
                    self.elements.swap(low, high);
                }
                continue;
            }

            let (i, j) = self.partition(low, high);

            if low < j {
                ranges.push((low, j));
            }
            if i < high {
                ranges.push((i, high));
            }
        }
    }

    /// Returns the cursors where they crossed: `[low, j]` holds elements no
    /// greater than the pivot and `[i, high]` elements no smaller.
    fn partition(&mut self, low: usize, high: usize) -> (usize, usize) {
        let elements = &mut self.elements;

        // pivot is tracked by position so `T` never needs to be cloned
        let mut pivot = low + (high - low) / 2;
        let mut i = low;
        let mut j = high;

        while i <= j {
            while elements[i] < elements[pivot] {
                i += 1;
            }
            while elements[j] > elements[pivot] {
                j -= 1;
            }

            if i <= j {
                elements.swap(i, j);

                if pivot == i {
                    pivot = j;
                } else if pivot == j {
                    pivot = i;
                }

                i += 1;
                match j.checked_sub(1) {
                    Some(prev) => j = prev,
                    None => break,
                }
            }
        }

        (i, j)
    }
}

impl<T> From<Vec<T>> for Sequence<T>
where
    T: Ord,
{
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}
