use jffs2::{
    DevT, new_decode_dev, new_encode_dev, old_decode_dev, old_encode_dev, old_valid_dev,
};

const SAMPLES: [DevT; 7] = [0, 1, 7, 0xff, 0x1234, 0xffff, DevT::MAX];

#[test]
fn test_encode_is_passthrough() {
    assert_eq!(old_encode_dev(7), 7);
    assert_eq!(new_encode_dev(7), 7);
    for dev in SAMPLES {
        assert_eq!(old_encode_dev(dev), dev);
        assert_eq!(new_encode_dev(dev), dev);
    }
}

#[test]
fn test_decode_is_passthrough() {
    assert_eq!(new_decode_dev(7), 7);
    assert_eq!(old_decode_dev(7), 7);
    for dev in SAMPLES {
        assert_eq!(new_decode_dev(dev), dev);
    }
    for dev in [0u16, 1, 0x7fff, u16::MAX] {
        assert_eq!(old_decode_dev(dev), DevT::from(dev));
    }
}

#[test]
fn test_old_format_never_valid() {
    for dev in SAMPLES {
        assert!(!old_valid_dev(dev));
    }
}
