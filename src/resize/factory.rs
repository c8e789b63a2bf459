//! Maps resize parameters and the capability tier to a resampler.

use crate::cpu::{self, Capability};
use crate::kernel::scalar::Scalar;
use crate::kernel::KernelKind;
use crate::params::{ResizeMethod, ResizeParameters, SampleKind};
use crate::resize::area::AreaResampler;
use crate::resize::bicubic::BicubicU8;
use crate::resize::bilinear::{BilinearFloat, BilinearU8};
use crate::resize::nearest::NearestResampler;
use crate::resize::Resampler;
use crate::trace::trace_event;
use crate::util::{RescaleError, RescaleResult};

#[cfg(target_arch = "x86_64")]
use crate::kernel::avx2::Avx2;
#[cfg(feature = "simd")]
use crate::kernel::simd::Simd;

/// Binds the kernel type for `$kind` to `$k` and evaluates `$body`.
///
/// Kinds not compiled into this build fall back to the scalar kernel, which
/// produces identical output.
macro_rules! with_kernel {
    ($kind:expr, $k:ident => $body:expr) => {
        match $kind {
            #[cfg(feature = "simd")]
            KernelKind::Simd => {
                type $k = Simd;
                $body
            }
            #[cfg(target_arch = "x86_64")]
            KernelKind::Avx2 => {
                type $k = Avx2;
                $body
            }
            _ => {
                type $k = Scalar;
                $body
            }
        }
    };
}

/// Creates resamplers for the tier it was built with.
///
/// # Example
/// ```
/// use rescaler::{ResizeMethod, ResizeParameters, ResizerFactory, SampleKind};
///
/// let params =
///     ResizeParameters::new(4, 4, 2, 2, 1, SampleKind::U8, ResizeMethod::Area).unwrap();
/// let mut resampler = ResizerFactory::new().create(&params).unwrap();
/// let src = [10u8; 16];
/// let mut dst = [0u8; 4];
/// resampler.resize(&src, 4, &mut dst, 2).unwrap();
/// assert_eq!(dst, [10; 4]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ResizerFactory {
    capability: Capability,
}

impl Default for ResizerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizerFactory {
    /// Uses the process-wide detected capability.
    pub fn new() -> Self {
        Self {
            capability: cpu::capability(),
        }
    }

    /// Uses `capability`, lowered to the detected tier if it is wider.
    pub fn with_capability(capability: Capability) -> Self {
        Self {
            capability: capability.min(cpu::capability()),
        }
    }

    /// Tier this factory selects kernels for.
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Kernel family used by the interpolating resamplers.
    pub fn kernel(&self) -> KernelKind {
        KernelKind::for_capability(self.capability)
    }

    /// Creates a resampler for `params`.
    ///
    /// Fails with [`RescaleError::UnsupportedCombination`] when the method is
    /// not implemented for the sample kind, and with
    /// [`RescaleError::AreaTooLarge`] when an area source cannot be normalized
    /// exactly.
    pub fn create(&self, params: &ResizeParameters) -> RescaleResult<Box<dyn Resampler>> {
        let params = params.clone();
        let method = params.method();
        let sample = params.sample();
        let resampler: Box<dyn Resampler> = match (method, sample) {
            (ResizeMethod::Nearest | ResizeMethod::NearestPytorch, _) => {
                Box::new(NearestResampler::new(params))
            }
            (ResizeMethod::Area, SampleKind::U8) => {
                with_kernel!(self.kernel(), K => Box::new(AreaResampler::<K>::new(params)?))
            }
            (
                ResizeMethod::Bilinear
                | ResizeMethod::BilinearCaffe
                | ResizeMethod::BilinearPytorch,
                _,
            ) => match sample {
                SampleKind::U8 => {
                    with_kernel!(self.kernel(), K => Box::new(BilinearU8::<K>::new(params)))
                }
                SampleKind::U16 => {
                    with_kernel!(self.kernel(), K => Box::new(BilinearFloat::<K, u16>::new(params)))
                }
                SampleKind::F32 => {
                    with_kernel!(self.kernel(), K => Box::new(BilinearFloat::<K, f32>::new(params)))
                }
            },
            (ResizeMethod::Bicubic, SampleKind::U8) => {
                with_kernel!(self.kernel(), K => Box::new(BicubicU8::<K>::new(params)))
            }
            (ResizeMethod::Area | ResizeMethod::Bicubic, _) => {
                return Err(RescaleError::UnsupportedCombination { method, sample });
            }
        };
        let variant = resampler.variant();
        trace_event!(
            "resampler_selected",
            family = variant.family.name(),
            kernel = variant.kernel.name(),
            capability = self.capability.name()
        );
        Ok(resampler)
    }
}

#[cfg(test)]
mod tests {
    use super::ResizerFactory;
    use crate::cpu::{self, Capability};
    use crate::kernel::KernelKind;
    use crate::params::{ResizeMethod, ResizeParameters, SampleKind};
    use crate::resize::Family;
    use crate::util::RescaleError;

    fn params(sample: SampleKind, method: ResizeMethod) -> ResizeParameters {
        ResizeParameters::new(8, 8, 3, 5, 3, sample, method).unwrap()
    }

    #[test]
    fn maps_methods_to_families() {
        let factory = ResizerFactory::with_capability(Capability::Baseline);
        let cases = [
            (SampleKind::F32, ResizeMethod::Nearest, Family::Nearest),
            (SampleKind::U16, ResizeMethod::NearestPytorch, Family::Nearest),
            (SampleKind::U8, ResizeMethod::Area, Family::Area),
            (SampleKind::U8, ResizeMethod::BilinearCaffe, Family::Bilinear),
            (SampleKind::U16, ResizeMethod::Bilinear, Family::Bilinear),
            (SampleKind::F32, ResizeMethod::BilinearPytorch, Family::Bilinear),
            (SampleKind::U8, ResizeMethod::Bicubic, Family::Bicubic),
        ];
        for (sample, method, family) in cases {
            let r = factory.create(&params(sample, method)).unwrap();
            assert_eq!(r.variant().family, family);
            assert_eq!(r.variant().kernel, KernelKind::Scalar);
        }
    }

    #[test]
    fn rejects_unimplemented_combinations() {
        let factory = ResizerFactory::new();
        for (sample, method) in [
            (SampleKind::F32, ResizeMethod::Area),
            (SampleKind::U16, ResizeMethod::Bicubic),
        ] {
            let err = factory.create(&params(sample, method)).err();
            assert_eq!(err, Some(RescaleError::UnsupportedCombination { method, sample }));
        }
    }

    #[test]
    fn forced_capability_never_exceeds_detected() {
        let factory = ResizerFactory::with_capability(Capability::Vector512);
        assert_eq!(factory.capability(), cpu::capability());
        assert_eq!(ResizerFactory::default().capability(), cpu::capability());
    }
}
