use com::{ComError, framing};
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn test_round_trip_small_frame() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_frame(&mut writer, b"hello")
        .await
        .expect("write failed");

    let decoded = framing::read_frame(&mut reader).await.expect("read failed");
    assert_eq!(decoded, b"hello");
}

#[tokio::test]
async fn test_round_trip_empty_frame() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_frame(&mut writer, &[]).await.expect("write failed");
    framing::write_frame(&mut writer, b"next").await.expect("write failed");

    let empty = framing::read_frame(&mut reader).await.expect("read failed");
    assert!(empty.is_empty());

    // the empty frame must not swallow the one after it
    let next = framing::read_frame(&mut reader).await.expect("read failed");
    assert_eq!(next, b"next");
}

#[tokio::test]
async fn test_round_trip_ten_million_bytes() {
    // duplex buffer far smaller than the payload forces many short reads
    let (mut writer, mut reader) = tokio::io::duplex(64 * 1024);

    let payload: Vec<u8> = (0..10_000_000u32).map(|i| (i % 251) as u8).collect();
    let expected = payload.clone();

    let write_task = tokio::spawn(async move {
        framing::write_frame(&mut writer, &payload).await
    });

    let decoded = framing::read_frame(&mut reader).await.expect("read failed");
    write_task
        .await
        .expect("writer panicked")
        .expect("write failed");

    assert_eq!(decoded.len(), expected.len());
    assert!(decoded == expected);
}

#[tokio::test]
async fn test_length_prefix_is_big_endian() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_frame(&mut writer, &[0xAA; 3]).await.expect("write failed");
    drop(writer);

    let raw = framing::read_exact(&mut reader, 7).await.expect("read failed");
    assert_eq!(raw, vec![0, 0, 0, 3, 0xAA, 0xAA, 0xAA]);
}

#[tokio::test]
async fn test_u32_and_dimensions_layout() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_u32(&mut writer, 1).await.expect("write failed");
    framing::write_dimensions(&mut writer, 1296, 972)
        .await
        .expect("write failed");
    drop(writer);

    let raw = framing::read_exact(&mut reader, 12).await.expect("read failed");
    assert_eq!(&raw[0..4], &[0, 0, 0, 1]);
    assert_eq!(&raw[4..8], &1296u32.to_be_bytes());
    assert_eq!(&raw[8..12], &972u32.to_be_bytes());
}

#[tokio::test]
async fn test_dimensions_round_trip() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_dimensions(&mut writer, 640, 480)
        .await
        .expect("write failed");

    let dims = framing::read_dimensions(&mut reader).await.expect("read failed");
    assert_eq!(dims, (640, 480));
}

#[tokio::test]
async fn test_close_before_prefix_is_connection_closed() {
    let (writer, mut reader) = tokio::io::duplex(1024);
    drop(writer);

    match framing::read_frame(&mut reader).await {
        Err(ComError::ConnectionClosed) => {}
        other => panic!("Expected ConnectionClosed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_close_inside_prefix_is_incomplete() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    writer.write_all(&[0x00, 0x00]).await.unwrap();
    drop(writer);

    match framing::read_u32(&mut reader).await {
        Err(ComError::IncompleteRead { expected, received }) => {
            assert_eq!(expected, 4);
            assert_eq!(received, 2);
        }
        other => panic!("Expected IncompleteRead, got {:?}", other),
    }
}

#[tokio::test]
async fn test_close_after_width_is_incomplete() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    framing::write_u32(&mut writer, 640).await.unwrap();
    drop(writer);

    match framing::read_dimensions(&mut reader).await {
        Err(ComError::IncompleteRead { expected, received }) => {
            assert_eq!(expected, 8);
            assert_eq!(received, 4);
        }
        other => panic!("Expected IncompleteRead, got {:?}", other),
    }
}

#[tokio::test]
async fn test_close_before_width_is_connection_closed() {
    let (writer, mut reader) = tokio::io::duplex(1024);
    drop(writer);

    assert!(matches!(
        framing::read_dimensions(&mut reader).await,
        Err(ComError::ConnectionClosed)
    ));
}

#[tokio::test]
async fn test_close_inside_payload_is_incomplete() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    writer.write_all(&10u32.to_be_bytes()).await.unwrap();
    writer.write_all(&[1, 2, 3, 4]).await.unwrap();
    drop(writer);

    match framing::read_frame(&mut reader).await {
        Err(ComError::IncompleteRead { expected, received }) => {
            assert_eq!(expected, 10);
            assert_eq!(received, 4);
        }
        other => panic!("Expected IncompleteRead, got {:?}", other),
    }
}

#[tokio::test]
async fn test_close_right_after_prefix_is_incomplete() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    writer.write_all(&10u32.to_be_bytes()).await.unwrap();
    drop(writer);

    match framing::read_frame(&mut reader).await {
        Err(ComError::IncompleteRead { expected, received }) => {
            assert_eq!(expected, 10);
            assert_eq!(received, 0);
        }
        other => panic!("Expected IncompleteRead, got {:?}", other),
    }
}

#[tokio::test]
async fn test_frame_too_large_rejected() {
    let (mut writer, mut reader) = tokio::io::duplex(16);

    let huge_length = framing::MAX_FRAME_SIZE + 1;
    writer
        .write_all(&huge_length.to_be_bytes())
        .await
        .expect("write length failed");

    match framing::read_frame(&mut reader).await {
        Err(ComError::MessageTooLarge(len)) => assert_eq!(len, huge_length),
        other => panic!("Expected MessageTooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_multiple_frames_in_sequence() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);

    for payload in [&b"one"[..], b"two", b"three"] {
        framing::write_frame(&mut writer, payload).await.unwrap();
    }

    assert_eq!(framing::read_frame(&mut reader).await.unwrap(), b"one");
    assert_eq!(framing::read_frame(&mut reader).await.unwrap(), b"two");
    assert_eq!(framing::read_frame(&mut reader).await.unwrap(), b"three");
}

#[tokio::test]
async fn test_read_identity_takes_single_read() {
    let (mut writer, mut reader) = tokio::io::duplex(4096);

    writer.write_all(b"coordinator").await.unwrap();

    let identity = framing::read_identity(&mut reader).await.unwrap();
    assert_eq!(identity, b"coordinator");
}

#[tokio::test]
async fn test_read_identity_caps_length() {
    let (mut writer, mut reader) = tokio::io::duplex(4096);

    writer.write_all(&[b'x'; 2000]).await.unwrap();

    let identity = framing::read_identity(&mut reader).await.unwrap();
    assert!(identity.len() <= framing::MAX_IDENTITY_SIZE);
    assert!(!identity.is_empty());
}

#[tokio::test]
async fn test_read_identity_on_closed_peer() {
    let (writer, mut reader) = tokio::io::duplex(64);
    drop(writer);

    assert!(matches!(
        framing::read_identity(&mut reader).await,
        Err(ComError::ConnectionClosed)
    ));
}
