use crate::error::{Result, SelectError};
use ndarray::{Array1, ArrayD, Axis, IxDyn};
use std::collections::BTreeMap;

/// Free-form string attributes (`units`, `long_name`, ...)
pub type Attrs = BTreeMap<String, String>;

/// A labeled array: values over named dimensions plus attributes.
///
/// Values are kept in standard (row-major) layout, so [`Variable::values`]
/// always sees every element in logical order.
///
/// # Examples
///
/// ```
/// use meshcut::Variable;
/// use ndarray::array;
///
/// let temp = Variable::new(
///     vec!["time", "nod2"],
///     array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn(),
/// )
/// .unwrap()
/// .with_attr("units", "degC");
///
/// assert_eq!(temp.len_of("nod2"), Some(3));
/// assert_eq!(temp.attr("units"), Some("degC"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    dims: Vec<String>,
    data: ArrayD<f64>,
    attrs: Attrs,
}

fn standard_layout(data: ArrayD<f64>) -> ArrayD<f64> {
    if data.is_standard_layout() {
        data
    } else {
        data.as_standard_layout().into_owned()
    }
}

impl Variable {
    /// Create a variable; one dimension name per array axis, no repeats.
    pub fn new<S: Into<String>>(dims: Vec<S>, data: ArrayD<f64>) -> Result<Self> {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != data.ndim() {
            return Err(SelectError::InvalidInput(format!(
                "{} dimension names given for a {}-dimensional array",
                dims.len(),
                data.ndim()
            )));
        }
        for (i, dim) in dims.iter().enumerate() {
            if dims[..i].contains(dim) {
                return Err(SelectError::InvalidInput(format!(
                    "dimension {} is repeated",
                    dim
                )));
            }
        }
        Ok(Self {
            dims,
            data: standard_layout(data),
            attrs: Attrs::new(),
        })
    }

    /// A 1-D variable over `dim`.
    pub fn from_vec(dim: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            dims: vec![dim.into()],
            data: Array1::from(values).into_dyn(),
            attrs: Attrs::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[f64] {
        self.data.as_slice().unwrap_or(&[])
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    pub fn len_of(&self, dim: &str) -> Option<usize> {
        self.axis_of(dim).map(|axis| self.data.shape()[axis])
    }

    /// Sizes of every dimension of this variable.
    pub fn sizes(&self) -> impl Iterator<Item = (&str, usize)> {
        self.dims
            .iter()
            .map(String::as_str)
            .zip(self.data.shape().iter().copied())
    }

    pub(crate) fn rename_dim(&mut self, from: &str, to: &str) {
        if let Some(axis) = self.axis_of(from) {
            self.dims[axis] = to.to_string();
        }
    }

    fn check_indices(&self, dim: &str, axis: usize, indices: &[usize]) -> Result<()> {
        let len = self.data.len_of(Axis(axis));
        match indices.iter().find(|&&i| i >= len) {
            Some(&bad) => Err(SelectError::InvalidInput(format!(
                "index {} out of range for dimension {} of length {}",
                bad, dim, len
            ))),
            None => Ok(()),
        }
    }

    fn with_data(&self, dims: Vec<String>, data: ArrayD<f64>) -> Self {
        Self {
            dims,
            data: standard_layout(data),
            attrs: self.attrs.clone(),
        }
    }

    /// Positional selection along `dim`, keeping the dimension.
    ///
    /// Variables without `dim` are returned unchanged.
    pub fn take(&self, dim: &str, indices: &[usize]) -> Result<Self> {
        let Some(axis) = self.axis_of(dim) else {
            return Ok(self.clone());
        };
        self.check_indices(dim, axis, indices)?;
        Ok(self.with_data(self.dims.clone(), self.data.select(Axis(axis), indices)))
    }

    /// Positional selection of a single position, dropping `dim`.
    pub fn index(&self, dim: &str, index: usize) -> Result<Self> {
        let Some(axis) = self.axis_of(dim) else {
            return Ok(self.clone());
        };
        self.check_indices(dim, axis, &[index])?;

        let mut dims = self.dims.clone();
        dims.remove(axis);
        Ok(self.with_data(dims, self.data.index_axis(Axis(axis), index).to_owned()))
    }

    /// Pointwise selection: position `i` of `along` takes `indices[i]` from
    /// `dim`, and `dim` is dropped.
    ///
    /// A variable that has `dim` but not `along` gains `along` in place of
    /// `dim`.
    pub fn take_pointwise(&self, dim: &str, indices: &[usize], along: &str) -> Result<Self> {
        let Some(axis) = self.axis_of(dim) else {
            return Ok(self.clone());
        };
        let Some(along_axis) = self.axis_of(along) else {
            let mut taken = self.take(dim, indices)?;
            taken.rename_dim(dim, along);
            return Ok(taken);
        };
        self.check_indices(dim, axis, indices)?;

        let along_len = self.data.len_of(Axis(along_axis));
        if along_len != indices.len() {
            return Err(SelectError::length_mismatch(along, along_len, indices.len()));
        }

        // Axis of `along` once `dim` is gone
        let along_out = if along_axis > axis {
            along_axis - 1
        } else {
            along_axis
        };
        let mut dims = self.dims.clone();
        dims.remove(axis);

        let data = if indices.is_empty() {
            let mut shape = self.data.shape().to_vec();
            shape.remove(axis);
            ArrayD::zeros(IxDyn(&shape))
        } else {
            let lanes: Vec<_> = indices
                .iter()
                .enumerate()
                .map(|(pos, &i)| {
                    self.data
                        .index_axis(Axis(axis), i)
                        .index_axis_move(Axis(along_out), pos)
                })
                .collect();
            ndarray::stack(Axis(along_out), &lanes)?
        };

        Ok(self.with_data(dims, data))
    }
}
