use super::*;
use std::fmt;

/// Renders the tensor as a nested bracketed list.
///
/// Siblings are separated by commas, followed by a line break when they are themselves tensors
/// of rank one or higher. A rank-0 tensor is rendered as its bare value. Formatting flags such
/// as precision are applied to every element.
impl<T: fmt::Display, S: Shape> fmt::Display for Tensor<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        S::fmt_storage(&self.data, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_display_vector() {
        let tensor = Tensor::<i32, shape![3]>::new([1, 2, 3]);
        assert_eq!(tensor.to_string(), "[1,2,3]");
    }

    #[test]
    fn can_display_matrix() {
        let tensor = Tensor::<i32, shape![3, 3]>::new([[1, 2, 3], [2, 4, 6], [3, 6, 9]]);
        assert_eq!(tensor.to_string(), "[[1,2,3],\n[2,4,6],\n[3,6,9]]");
    }

    #[test]
    fn can_display_rank_three() {
        let tensor = Tensor::<i32, shape![2, 2, 2]>::from_fn(|[i, j, k]| (i * 4 + j * 2 + k) as i32);
        assert_eq!(tensor.to_string(), "[[[0,1],\n[2,3]],\n[[4,5],\n[6,7]]]");
    }

    #[test]
    fn can_display_scalar() {
        let tensor = Tensor::from(14.5);
        assert_eq!(tensor.to_string(), "14.5");
    }

    #[test]
    fn passes_precision_to_elements() {
        let tensor = Tensor::<f64, shape![2]>::new([1., 2.5]);
        assert_eq!(format!("{tensor:.2}"), "[1.00,2.50]");
    }

    #[test]
    fn can_display_empty() {
        let tensor = Tensor::<i32, shape![0]>::default();
        assert_eq!(tensor.to_string(), "[]");
    }
}
