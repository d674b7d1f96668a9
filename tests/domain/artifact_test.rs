use audio_mediator::domain::{ArtifactDescriptor, ArtifactId, filename_from_location};

#[test]
fn given_no_explicit_id_when_creating_descriptor_then_location_is_identifier() {
    let descriptor = ArtifactDescriptor::from_location("http://uploader/files/clip.wav");

    assert_eq!(
        descriptor.identifier,
        ArtifactId::new("http://uploader/files/clip.wav")
    );
    assert_eq!(descriptor.filename, "clip.wav");
}

#[test]
fn given_blank_explicit_id_when_creating_descriptor_then_location_is_identifier() {
    let descriptor =
        ArtifactDescriptor::new("http://uploader/files/clip.wav", Some("  ".to_string()), None);

    assert_eq!(descriptor.identifier.as_str(), "http://uploader/files/clip.wav");
}

#[test]
fn given_explicit_id_and_filename_when_creating_descriptor_then_both_are_kept() {
    let descriptor = ArtifactDescriptor::new(
        "http://uploader/blob/8f3a",
        Some("upload-42".to_string()),
        Some("voicemail.wav".to_string()),
    );

    assert_eq!(descriptor.identifier.as_str(), "upload-42");
    assert_eq!(descriptor.filename, "voicemail.wav");
}

#[test]
fn given_url_with_query_when_deriving_filename_then_query_is_ignored() {
    assert_eq!(
        filename_from_location("https://blob.example/c/rec.wav?sig=abc&se=2025"),
        "rec.wav"
    );
}

#[test]
fn given_url_without_path_when_deriving_filename_then_falls_back() {
    assert_eq!(filename_from_location("http://localhost:3001/"), "artifact.wav");
    assert_eq!(filename_from_location("http://example.com"), "artifact.wav");
}

#[test]
fn given_plain_path_when_deriving_filename_then_uses_last_segment() {
    assert_eq!(filename_from_location("/srv/audio/in/a.wav"), "a.wav");
}
