use crate::models::ExerciseSet;

/// Anything carrying a 1-based position within its exercise.
pub trait Numbered {
    fn set_number(&self) -> u32;
    fn set_set_number(&mut self, number: u32);
}

impl Numbered for ExerciseSet {
    fn set_number(&self) -> u32 {
        self.set_number
    }

    fn set_set_number(&mut self, number: u32) {
        self.set_number = number;
    }
}

/// Overwrites every set number with its index + 1.
pub fn renumber<T: Numbered>(sets: &mut [T]) {
    for (index, set) in sets.iter_mut().enumerate() {
        set.set_set_number(index as u32 + 1);
    }
}

pub fn is_sequential<T: Numbered>(sets: &[T]) -> bool {
    sets.iter()
        .enumerate()
        .all(|(index, set)| set.set_number() == index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renumbers_after_gap() {
        let mut sets = vec![
            ExerciseSet::new(2, 50.0, 10),
            ExerciseSet::new(3, 50.0, 10),
            ExerciseSet::new(7, 55.0, 8),
        ];
        assert!(!is_sequential(&sets));

        renumber(&mut sets);

        let numbers: Vec<u32> = sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(is_sequential(&sets));
    }

    #[test]
    fn empty_list_is_sequential() {
        let mut sets: Vec<ExerciseSet> = Vec::new();
        renumber(&mut sets);
        assert!(is_sequential(&sets));
    }
}
