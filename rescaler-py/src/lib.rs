//! Python bindings for the rescaler image resampling library.
//!
//! Arrays are `numpy` arrays of shape `(H, W)` or `(H, W, C)` with `C` in
//! `1..=4` and dtype `uint8`, `uint16` or `float32`.

use numpy::{PyArray1, PyArrayMethods, PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;

use rescaler::parallel::resize_parallel;
use rescaler::{
    cpu, AreaMode, ErrorKind, OwnedImage, RescaleError, ResizeMethod, ResizeParameters,
    ResizerFactory, SampleKind,
};

/// Convert a RescaleError to a Python exception.
fn to_py_err(err: RescaleError) -> PyErr {
    match err.kind() {
        ErrorKind::InvalidConfiguration | ErrorKind::InvalidInput => {
            PyValueError::new_err(err.to_string())
        }
        ErrorKind::ResourceExhaustion => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Processor topology reported by `cpu_info()`.
#[pyclass]
#[derive(Clone)]
pub struct CpuInfo {
    #[pyo3(get)]
    pub logical_threads: usize,
    #[pyo3(get)]
    pub physical_cores: usize,
    #[pyo3(get)]
    pub sockets: usize,
    /// L1 data cache size in bytes.
    #[pyo3(get)]
    pub l1_data: usize,
    #[pyo3(get)]
    pub l2: usize,
    #[pyo3(get)]
    pub l3: usize,
}

#[pymethods]
impl CpuInfo {
    fn __repr__(&self) -> String {
        format!(
            "CpuInfo(logical_threads={}, physical_cores={}, sockets={}, l1_data={}, l2={}, l3={})",
            self.logical_threads,
            self.physical_cores,
            self.sockets,
            self.l1_data,
            self.l2,
            self.l3
        )
    }
}

struct Shape {
    height: usize,
    width: usize,
    channels: usize,
}

fn image_shape(shape: &[usize]) -> PyResult<Shape> {
    match *shape {
        [height, width] => Ok(Shape {
            height,
            width,
            channels: 1,
        }),
        [height, width, channels] => Ok(Shape {
            height,
            width,
            channels,
        }),
        _ => Err(PyValueError::new_err("array must have shape (H, W) or (H, W, C)")),
    }
}

/// Runs one resize over a packed source, in row bands when threads allow.
fn run(params: &ResizeParameters, src: &OwnedImage) -> PyResult<OwnedImage> {
    let factory = ResizerFactory::new();
    let mut dst = OwnedImage::new(
        params.dst_width(),
        params.dst_height(),
        params.channels(),
        params.sample(),
    )
    .map_err(to_py_err)?;
    let stride = dst.stride();
    resize_parallel(
        params,
        &factory,
        src.data(),
        src.stride(),
        dst.data_mut(),
        stride,
    )
    .map_err(to_py_err)?;
    Ok(dst)
}

fn output_dims(shape: &[usize], width: usize, height: usize) -> Vec<usize> {
    let mut dims = vec![height, width];
    dims.extend_from_slice(&shape[2..]);
    dims
}

/// Resize an image array.
///
/// Args:
///     array: uint8, uint16 or float32 array of shape (H, W) or (H, W, C)
///     width: Destination width in pixels
///     height: Destination height in pixels
///     method: "nearest", "nearest_pytorch", "area", "bilinear",
///         "bilinear_caffe", "bilinear_pytorch" or "bicubic" (default: "bilinear")
///     area_2x2: Pre-reduce by 2x2 blocks for "area" (default: False)
///
/// Returns:
///     New array of shape (height, width[, C]) with the input dtype
#[pyfunction]
#[pyo3(signature = (array, width, height, method = "bilinear", area_2x2 = false))]
fn resize<'py>(
    py: Python<'py>,
    array: &Bound<'py, PyAny>,
    width: usize,
    height: usize,
    method: &str,
    area_2x2: bool,
) -> PyResult<Bound<'py, PyAny>> {
    let method = ResizeMethod::from_name(&method.to_lowercase())
        .ok_or_else(|| PyValueError::new_err(format!("unknown method '{method}'")))?;
    let area_mode = if area_2x2 {
        AreaMode::TwoByTwo
    } else {
        AreaMode::OneByOne
    };
    let params = |shape: &Shape, sample: SampleKind| {
        ResizeParameters::new(
            shape.width,
            shape.height,
            width,
            height,
            shape.channels,
            sample,
            method,
        )
        .map(|p| p.with_area_mode(area_mode))
        .map_err(to_py_err)
    };

    if let Ok(input) = array.extract::<PyReadonlyArrayDyn<'py, u8>>() {
        let shape = image_shape(input.shape())?;
        let dims = output_dims(input.shape(), width, height);
        let src = OwnedImage::from_vec(
            input.as_slice()?.to_vec(),
            shape.width,
            shape.height,
            shape.channels,
            SampleKind::U8,
        )
        .map_err(to_py_err)?;
        let out = run(&params(&shape, SampleKind::U8)?, &src)?;
        let array = PyArray1::from_vec(py, out.data().to_vec()).reshape(dims)?;
        return Ok(array.into_any());
    }
    if let Ok(input) = array.extract::<PyReadonlyArrayDyn<'py, u16>>() {
        let shape = image_shape(input.shape())?;
        let dims = output_dims(input.shape(), width, height);
        let src =
            OwnedImage::from_u16(input.as_slice()?, shape.width, shape.height, shape.channels)
                .map_err(to_py_err)?;
        let out = run(&params(&shape, SampleKind::U16)?, &src)?;
        let array = PyArray1::from_vec(py, out.to_u16_vec()).reshape(dims)?;
        return Ok(array.into_any());
    }
    if let Ok(input) = array.extract::<PyReadonlyArrayDyn<'py, f32>>() {
        let shape = image_shape(input.shape())?;
        let dims = output_dims(input.shape(), width, height);
        let src =
            OwnedImage::from_f32(input.as_slice()?, shape.width, shape.height, shape.channels)
                .map_err(to_py_err)?;
        let out = run(&params(&shape, SampleKind::F32)?, &src)?;
        let array = PyArray1::from_vec(py, out.to_f32_vec()).reshape(dims)?;
        return Ok(array.into_any());
    }
    Err(PyTypeError::new_err(
        "array must be a uint8, uint16 or float32 numpy array",
    ))
}

/// Name of the vector tier detected on this machine.
#[pyfunction]
fn capability() -> &'static str {
    cpu::capability().name()
}

/// Processor topology and cache sizes.
#[pyfunction]
fn cpu_info() -> CpuInfo {
    let info = cpu::cpu_info();
    CpuInfo {
        logical_threads: info.logical_threads,
        physical_cores: info.physical_cores,
        sockets: info.sockets,
        l1_data: info.l1_data,
        l2: info.l2,
        l3: info.l3,
    }
}

/// Set the number of row bands used by `resize`; returns the clamped value.
#[pyfunction]
fn set_thread_number(threads: usize) -> usize {
    cpu::set_thread_number(threads)
}

/// Python module for rescaler.
#[pymodule]
fn _rescaler(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CpuInfo>()?;
    m.add_function(wrap_pyfunction!(resize, m)?)?;
    m.add_function(wrap_pyfunction!(capability, m)?)?;
    m.add_function(wrap_pyfunction!(cpu_info, m)?)?;
    m.add_function(wrap_pyfunction!(set_thread_number, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
