use std::path::Path;
use std::sync::Mutex;
use tch::{CModule, Device, Kind, Tensor};

use super::{Classifier, ImageTensor, InferenceError};

/// TorchScript export of the leaf classifier. The module takes the NHWC
/// batch as produced by preprocessing and returns one score per class.
pub struct TorchClassifier {
    module: Mutex<CModule>,
    device: Device,
}

impl TorchClassifier {
    pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
        let device = Device::cuda_if_available();
        let module = CModule::load_on_device(model_path, device)
            .map_err(|e| InferenceError::Model(e.to_string()))?;

        Ok(Self {
            module: Mutex::new(module),
            device,
        })
    }
}

impl Classifier for TorchClassifier {
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError> {
        let shape: Vec<i64> = input.shape().iter().map(|&d| d as i64).collect();
        let values: Vec<f32> = input.iter().copied().collect();
        let tensor = Tensor::from_slice(&values)
            .view(shape.as_slice())
            .to_device(self.device);

        let output = self
            .module
            .lock()
            .map_err(|_| InferenceError::Model("model lock poisoned".into()))?
            .forward_ts(&[tensor])
            .map_err(|e| InferenceError::Model(e.to_string()))?;

        let output_flat = output
            .to_kind(Kind::Float)
            .to_device(Device::Cpu)
            .view([-1]);
        let num_elements = output_flat.size()[0] as usize;
        let mut scores = vec![0.0f32; num_elements];
        output_flat.copy_data(&mut scores, num_elements);
        Ok(scores)
    }
}
