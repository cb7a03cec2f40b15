use crate::{Parameter, ParameterType, ParameterValue, TreeError};

/// Homogeneous list of parameters sharing one default element.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    default: Box<Parameter>,
    elements: Vec<Parameter>,
}

impl Array {
    /// `len` copies of `default`.
    pub fn new(default: Parameter, len: usize) -> Self {
        let elements = vec![default.clone(); len];
        Self {
            default: Box::new(default),
            elements,
        }
    }

    pub fn default_element(&self) -> &Parameter {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&Parameter> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut Parameter> {
        self.elements.get_mut(index)
    }

    pub fn get<T: ParameterType>(&self, index: usize) -> Option<&T> {
        T::from_value(&self.elements.get(index)?.value)
    }

    pub fn get_mut<T: ParameterType>(&mut self, index: usize) -> Option<&mut T> {
        T::from_value_mut(&mut self.elements.get_mut(index)?.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Parameter> {
        self.elements.iter_mut()
    }

    /// Appends a copy of the default element and returns it.
    pub fn push_default(&mut self) -> &mut Parameter {
        self.elements.push((*self.default).clone());
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    /// Appends `value` wrapped like the default element.
    pub fn push(&mut self, value: impl Into<ParameterValue>) -> Result<(), TreeError> {
        let value = value.into();
        if value.kind() != self.default.kind() {
            return Err(TreeError::TypeMismatch {
                path: self.elements.len().to_string(),
                expected: self.default.kind(),
                actual: value.kind(),
            });
        }
        let mut element = (*self.default).clone();
        element.value = value;
        self.elements.push(element);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Parameter> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    /// Truncates, or pads with copies of the default element.
    pub fn resize(&mut self, len: usize) {
        let default = &self.default;
        self.elements.resize_with(len, || (**default).clone());
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
