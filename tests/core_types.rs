use rescaler::{
    AreaMode, ErrorKind, ImageView, ImageViewMut, OwnedImage, RescaleError, ResizeMethod,
    ResizeParameters, ResizerFactory, SampleKind, DEFAULT_ALIGNMENT,
};

#[test]
fn parameters_reject_zero_extents() {
    let err = ResizeParameters::new(0, 4, 2, 2, 1, SampleKind::U8, ResizeMethod::Bilinear)
        .err()
        .unwrap();
    assert_eq!(
        err,
        RescaleError::InvalidDimensions {
            width: 0,
            height: 4,
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

    let err = ResizeParameters::new(4, 4, 2, 0, 1, SampleKind::U8, ResizeMethod::Area)
        .err()
        .unwrap();
    assert_eq!(
        err,
        RescaleError::InvalidDimensions {
            width: 2,
            height: 0,
        }
    );
}

#[test]
fn parameters_reject_channel_counts_outside_one_to_four() {
    for channels in [0, 5, 8] {
        let err =
            ResizeParameters::new(4, 4, 2, 2, channels, SampleKind::U8, ResizeMethod::Nearest)
                .err()
                .unwrap();
        assert_eq!(err, RescaleError::UnsupportedChannels { channels });
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }
}

#[test]
fn parameters_expose_geometry() {
    let params = ResizeParameters::new(7, 5, 3, 2, 3, SampleKind::U16, ResizeMethod::Bilinear)
        .unwrap()
        .with_area_mode(AreaMode::TwoByTwo);
    assert_eq!(params.pixel_size(), 6);
    assert_eq!(params.src_row_bytes(), 42);
    assert_eq!(params.dst_row_bytes(), 18);
    assert_eq!(params.alignment(), DEFAULT_ALIGNMENT);
    assert_eq!(params.area_mode(), AreaMode::TwoByTwo);

    let err = params.clone().with_alignment(12).err().unwrap();
    assert_eq!(err, RescaleError::InvalidAlignment { align: 12 });
    assert_eq!(params.with_alignment(8).unwrap().alignment(), 8);
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];
    let err = ImageView::new(&data, 4, 1, 1, 3).err().unwrap();
    assert_eq!(
        err,
        RescaleError::InvalidStride {
            row_bytes: 4,
            stride: 3,
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 9];
    // Two rows of 2 pixels * 3 bytes with a stride of 8: 8 + 6 bytes.
    let err = ImageView::new(&data, 2, 2, 3, 8).err().unwrap();
    assert_eq!(err, RescaleError::BufferTooSmall { needed: 14, got: 9 });
}

#[test]
fn padded_views_skip_padding() {
    let data: Vec<u8> = (0u8..11).collect();
    let view = ImageView::new(&data, 3, 2, 1, 8).unwrap();
    assert_eq!(view.row(0), Some(&data[0..3]));
    assert_eq!(view.row(1), Some(&data[8..11]));
    assert_eq!(view.row(2), None);

    let mut out = [0u8; 10];
    let mut view = ImageViewMut::new(&mut out, 2, 2, 2, 6).unwrap();
    view.row_mut(1).unwrap().copy_from_slice(&[1, 2, 3, 4]);
    assert_eq!(out, [0, 0, 0, 0, 0, 0, 1, 2, 3, 4]);
}

#[test]
fn owned_images_decode_samples() {
    let img = OwnedImage::from_u16(&[1, 2, 65535, 4], 2, 2, 1).unwrap();
    assert_eq!(img.stride(), 4);
    assert_eq!(img.to_u16_vec(), vec![1, 2, 65535, 4]);
    assert!(img.to_f32_vec().is_empty());

    let err = OwnedImage::from_vec(vec![0; 5], 2, 1, 1, SampleKind::F32)
        .err()
        .unwrap();
    assert_eq!(err, RescaleError::BufferTooSmall { needed: 8, got: 5 });
}

#[test]
fn resize_validates_buffers_and_rows() {
    let params =
        ResizeParameters::new(4, 4, 2, 2, 1, SampleKind::U8, ResizeMethod::Bilinear).unwrap();
    let mut resampler = ResizerFactory::new().create(&params).unwrap();
    let src = [0u8; 16];
    let mut dst = [0u8; 4];

    let err = resampler.resize(&src[..12], 4, &mut dst, 2).err().unwrap();
    assert_eq!(err, RescaleError::BufferTooSmall { needed: 16, got: 12 });

    let err = resampler.resize(&src, 4, &mut dst, 1).err().unwrap();
    assert_eq!(
        err,
        RescaleError::InvalidStride {
            row_bytes: 2,
            stride: 1,
        }
    );

    let err = resampler
        .resize_rows(&src, 4, &mut dst, 2, 1..3)
        .err()
        .unwrap();
    assert_eq!(
        err,
        RescaleError::RowRangeOutOfBounds {
            start: 1,
            end: 3,
            height: 2,
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn unsupported_combinations_are_configuration_errors() {
    let params =
        ResizeParameters::new(4, 4, 2, 2, 1, SampleKind::F32, ResizeMethod::Bicubic).unwrap();
    let err = ResizerFactory::new().create(&params).err().unwrap();
    assert_eq!(
        err,
        RescaleError::UnsupportedCombination {
            method: ResizeMethod::Bicubic,
            sample: SampleKind::F32,
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
}

#[test]
fn oversized_area_sources_are_refused() {
    let params =
        ResizeParameters::new(1 << 16, 1 << 16, 4, 4, 1, SampleKind::U8, ResizeMethod::Area)
            .unwrap();
    let err = ResizerFactory::new().create(&params).err().unwrap();
    assert_eq!(err, RescaleError::AreaTooLarge { pixels: 1 << 32 });
}
