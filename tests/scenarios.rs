//! Fixture scenarios and the general properties every resampler must hold.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rescaler::lowlevel::{
    CubicTable, LinearTableF32, LinearTableU8, BICUBIC_RANGE, FRACTION_RANGE,
};
use rescaler::{AreaMode, OwnedImage, ResizeMethod, ResizeParameters, ResizerFactory, SampleKind};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    method: String,
    #[serde(default)]
    area_2x2: bool,
    channels: usize,
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    src: Vec<u8>,
    expected: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    cases: Vec<Scenario>,
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/scenarios.json")
}

const BYTE_METHODS: [ResizeMethod; 7] = [
    ResizeMethod::Nearest,
    ResizeMethod::NearestPytorch,
    ResizeMethod::Area,
    ResizeMethod::Bilinear,
    ResizeMethod::BilinearCaffe,
    ResizeMethod::BilinearPytorch,
    ResizeMethod::Bicubic,
];

const WIDE_METHODS: [ResizeMethod; 5] = [
    ResizeMethod::Nearest,
    ResizeMethod::NearestPytorch,
    ResizeMethod::Bilinear,
    ResizeMethod::BilinearCaffe,
    ResizeMethod::BilinearPytorch,
];

fn random_image(
    rng: &mut StdRng,
    width: usize,
    height: usize,
    channels: usize,
    sample: SampleKind,
) -> OwnedImage {
    let len = width * height * channels;
    match sample {
        SampleKind::U8 => {
            let data = (0..len).map(|_| rng.random_range(0..=255u8)).collect();
            OwnedImage::from_vec(data, width, height, channels, sample).unwrap()
        }
        SampleKind::U16 => {
            let data: Vec<u16> = (0..len).map(|_| rng.random_range(0..=u16::MAX)).collect();
            OwnedImage::from_u16(&data, width, height, channels).unwrap()
        }
        SampleKind::F32 => {
            let data: Vec<f32> = (0..len).map(|_| rng.random_range(-4.0..4.0f32)).collect();
            OwnedImage::from_f32(&data, width, height, channels).unwrap()
        }
    }
}

fn run(params: &ResizeParameters, src: &OwnedImage) -> OwnedImage {
    let mut dst = OwnedImage::new(
        params.dst_width(),
        params.dst_height(),
        params.channels(),
        params.sample(),
    )
    .unwrap();
    let stride = dst.stride();
    ResizerFactory::new()
        .create(params)
        .unwrap()
        .resize(src.data(), src.stride(), dst.data_mut(), stride)
        .unwrap();
    dst
}

#[test]
fn fixture_scenarios_match_expected_output() {
    let text = fs::read_to_string(fixture_path()).expect("read scenarios.json");
    let fixture: Fixture = serde_json::from_str(&text).expect("parse scenarios.json");
    assert!(!fixture.cases.is_empty());

    for case in fixture.cases {
        let method = ResizeMethod::from_name(&case.method)
            .unwrap_or_else(|| panic!("{}: unknown method {}", case.name, case.method));
        let mode = if case.area_2x2 {
            AreaMode::TwoByTwo
        } else {
            AreaMode::OneByOne
        };
        let params = ResizeParameters::new(
            case.src_width,
            case.src_height,
            case.dst_width,
            case.dst_height,
            case.channels,
            SampleKind::U8,
            method,
        )
        .unwrap()
        .with_area_mode(mode);
        let src = OwnedImage::from_vec(
            case.src,
            case.src_width,
            case.src_height,
            case.channels,
            SampleKind::U8,
        )
        .unwrap();
        let out = run(&params, &src);
        assert_eq!(out.data(), case.expected.as_slice(), "{}", case.name);
    }
}

#[test]
fn identity_resize_reproduces_source() {
    let mut rng = StdRng::seed_from_u64(0x1de);
    for channels in 1..=4 {
        for (sample, methods) in [
            (SampleKind::U8, &BYTE_METHODS[..]),
            (SampleKind::U16, &WIDE_METHODS[..]),
            (SampleKind::F32, &WIDE_METHODS[..]),
        ] {
            let src = random_image(&mut rng, 13, 9, channels, sample);
            for &method in methods {
                let params =
                    ResizeParameters::new(13, 9, 13, 9, channels, sample, method).unwrap();
                let out = run(&params, &src);
                assert_eq!(out, src, "{method:?} {sample:?} x{channels}");
            }
        }
    }
}

#[test]
fn float_outputs_stay_within_input_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let src = random_image(&mut rng, 17, 11, 2, SampleKind::F32);
    let values = src.to_f32_vec();
    let lo = values.iter().copied().fold(f32::INFINITY, f32::min);
    let hi = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    for &method in &WIDE_METHODS {
        for (dw, dh) in [(5, 3), (40, 29), (17, 1)] {
            let params = ResizeParameters::new(17, 11, dw, dh, 2, SampleKind::F32, method).unwrap();
            let out = run(&params, &src).to_f32_vec();
            assert_eq!(out.len(), dw * dh * 2);
            for v in out {
                assert!(v >= lo - 1e-4 && v <= hi + 1e-4, "{method:?}: {v}");
            }
        }
    }
}

#[test]
fn table_weights_sum_to_one_unit() {
    for method in [
        ResizeMethod::Bilinear,
        ResizeMethod::BilinearCaffe,
        ResizeMethod::BilinearPytorch,
    ] {
        for (src, dst) in [(1, 5), (7, 3), (10, 31), (64, 64)] {
            let fixed = LinearTableU8::build_u8(src, dst, method).unwrap();
            let float = LinearTableF32::build_f32(src, dst, method).unwrap();
            for d in 0..dst {
                assert_eq!(fixed.weights_at(d).iter().sum::<i32>(), FRACTION_RANGE);
                assert!((float.weights_at(d).iter().sum::<f32>() - 1.0).abs() < 1e-6);
            }
        }
    }
    let cubic = CubicTable::build(10, 31).unwrap();
    for w in cubic.weights() {
        assert_eq!(w.iter().sum::<i32>(), BICUBIC_RANGE);
    }
}

const AREA_SHAPES: [(usize, usize, usize, usize); 5] = [
    (16, 16, 4, 4),
    (17, 9, 5, 4),
    (7, 5, 7, 5),
    (3, 2, 8, 9),
    (31, 1, 1, 1),
];

#[test]
fn area_conserves_constant_images() {
    for value in [0u8, 1, 77, 128, 254, 255] {
        for (sw, sh, dw, dh) in AREA_SHAPES {
            for mode in [AreaMode::OneByOne, AreaMode::TwoByTwo] {
                for channels in [1, 3] {
                    let params = ResizeParameters::new(
                        sw,
                        sh,
                        dw,
                        dh,
                        channels,
                        SampleKind::U8,
                        ResizeMethod::Area,
                    )
                    .unwrap()
                    .with_area_mode(mode);
                    let src = OwnedImage::from_vec(
                        vec![value; sw * sh * channels],
                        sw,
                        sh,
                        channels,
                        SampleKind::U8,
                    )
                    .unwrap();
                    let out = run(&params, &src);
                    assert!(
                        out.data().iter().all(|&v| v == value),
                        "{value} {sw}x{sh}->{dw}x{dh} {mode:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn horizontal_ramps_stay_monotonic() {
    let width = 32;
    let ramp: Vec<u8> = (0..width as u8).map(|x| x * 8).collect();
    let src = OwnedImage::from_vec(ramp.repeat(3), width, 3, 1, SampleKind::U8).unwrap();
    for method in [
        ResizeMethod::Nearest,
        ResizeMethod::NearestPytorch,
        ResizeMethod::Bilinear,
        ResizeMethod::BilinearCaffe,
        ResizeMethod::BilinearPytorch,
        ResizeMethod::Bicubic,
    ] {
        for dw in [12, 45, 80] {
            let params =
                ResizeParameters::new(width, 3, dw, 2, 1, SampleKind::U8, method).unwrap();
            let out = run(&params, &src);
            for row in out.data().chunks_exact(dw) {
                assert!(
                    row.windows(2).all(|w| w[0] <= w[1]),
                    "{method:?} -> {dw}: {row:?}"
                );
            }
        }
    }
}

#[test]
fn full_byte_gradient_stays_monotonic() {
    let ramp: Vec<u8> = (0..=255u8).collect();
    let src = OwnedImage::from_vec(ramp.repeat(2), 256, 2, 1, SampleKind::U8).unwrap();
    for method in [
        ResizeMethod::Nearest,
        ResizeMethod::NearestPytorch,
        ResizeMethod::Bilinear,
        ResizeMethod::BilinearCaffe,
        ResizeMethod::BilinearPytorch,
        ResizeMethod::Bicubic,
    ] {
        for dw in [3, 255, 257, 511, 1000] {
            let params = ResizeParameters::new(256, 2, dw, 2, 1, SampleKind::U8, method).unwrap();
            let out = run(&params, &src);
            for row in out.data().chunks_exact(dw) {
                assert!(
                    row.windows(2).all(|w| w[0] <= w[1]),
                    "{method:?} 256 -> {dw}"
                );
            }
        }
    }
}

#[test]
fn bicubic_four_to_eight_classifies_every_region() {
    let table = CubicTable::build(4, 8).unwrap();
    let edges = table.edges();
    assert!(!edges.nose.is_empty());
    assert!(!edges.body.is_empty());
    assert!(!edges.tail.is_empty());
    for d in edges.nose.chain(edges.tail) {
        for tap in table.taps(d) {
            assert!(tap < 4, "column {d} taps {:?}", table.taps(d));
        }
    }
}

#[test]
fn single_pixel_destinations_collapse() {
    let src = OwnedImage::from_vec((0u8..24).collect(), 6, 4, 1, SampleKind::U8).unwrap();
    for &method in &BYTE_METHODS {
        let params = ResizeParameters::new(6, 4, 1, 1, 1, SampleKind::U8, method).unwrap();
        let out = run(&params, &src);
        assert_eq!(out.data().len(), 1);
    }
    // Mean of 0..24 is 11.5, which rounds half up.
    let params =
        ResizeParameters::new(6, 4, 1, 1, 1, SampleKind::U8, ResizeMethod::Area).unwrap();
    assert_eq!(run(&params, &src).data(), &[12]);
}
