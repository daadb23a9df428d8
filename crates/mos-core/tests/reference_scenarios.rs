//! Reference scenarios for the audio and video models
//!
//! Each block mirrors a measured call condition; the bounds are the ranges
//! the regression was fitted to.

use rtcmos_core::{score_batch, AudioParams, ScoreResult, StreamStat, VideoParams};

fn score_one(stat: StreamStat) -> ScoreResult {
    let scores = score_batch(&[stat]);
    assert_eq!(scores.len(), 1);
    scores[0]
}

fn score_two(first: StreamStat, second: StreamStat) -> (ScoreResult, ScoreResult) {
    let scores = score_batch(&[first, second]);
    assert_eq!(scores.len(), 2);
    (scores[0], scores[1])
}

fn audio_with(packet_loss: f64, fec: Option<bool>) -> StreamStat {
    StreamStat {
        packet_loss,
        audio: Some(AudioParams { fec, dtx: None }),
        ..Default::default()
    }
}

/// Video sample with zero jitter and zero RTT
fn clean_video(bitrate: f64, width: u32, height: u32, fps: f64) -> StreamStat {
    StreamStat::video(
        bitrate,
        VideoParams::default()
            .with_resolution(width, height)
            .with_frame_rate(fps),
    )
    .with_buffer_delay(0)
    .with_round_trip_time(0)
}

fn assert_between(value: f64, low: f64, high: f64) {
    assert!(
        value >= low && value <= high,
        "{value} not within [{low}, {high}]"
    );
}

#[test]
fn audio_is_close_to_4_5_in_perfect_conditions() {
    let result = score_one(
        StreamStat::audio(0.0, 0.0)
            .with_round_trip_time(0)
            .with_buffer_delay(0),
    );
    assert_between(result.audio_score, 4.4, 4.5);
}

#[test]
fn audio_is_1_in_worst_conditions() {
    let result = score_one(StreamStat::audio(100.0, 0.0));
    assert_between(result.audio_score, 1.0, 1.2);
}

#[test]
fn audio_is_1_with_huge_delay() {
    let result = score_one(StreamStat::audio(100.0, 0.0).with_round_trip_time(1_000_000_000));
    assert_between(result.audio_score, 1.0, 1.1);
}

#[test]
fn audio_depends_on_packet_loss() {
    let (a, b) = score_two(StreamStat::audio(10.0, 0.0), StreamStat::audio(20.0, 0.0));
    assert!(a.audio_score > b.audio_score);
}

#[test]
fn audio_depends_on_bitrate() {
    let (a, b) = score_two(
        StreamStat::audio(0.0, 100_000.0),
        StreamStat::audio(0.0, 8_000.0),
    );
    assert!(a.audio_score > b.audio_score);
}

#[test]
fn audio_depends_on_fec() {
    let (a, b) = score_two(audio_with(10.0, Some(true)), audio_with(10.0, Some(false)));
    assert!(a.audio_score > b.audio_score);
}

#[test]
fn audio_depends_on_buffer_delay() {
    let (a, b) = score_two(
        StreamStat::audio(0.0, 0.0).with_buffer_delay(10),
        StreamStat::audio(0.0, 0.0).with_buffer_delay(100),
    );
    assert!(a.audio_score > b.audio_score);
}

#[test]
fn audio_control_conditions() {
    assert_between(score_one(StreamStat::audio(15.0, 0.0)).audio_score, 2.5, 3.0);
    assert_between(score_one(StreamStat::audio(30.0, 0.0)).audio_score, 1.5, 2.0);
    assert_between(score_one(StreamStat::audio(50.0, 0.0)).audio_score, 1.3, 2.0);
}

#[test]
fn audio_absorbs_out_of_range_loss() {
    let result = score_one(StreamStat::audio(50_000.0, 0.0));
    assert_between(result.audio_score, 1.0, 1.1);
}

#[test]
fn video_ideal_hd_layer() {
    assert!(score_one(clean_video(2_100_000.0, 1280, 720, 30.0)).video_score >= 4.9);
    assert!(score_one(clean_video(2_000_000.0, 1280, 720, 30.0)).video_score >= 4.5);
    assert!(score_one(clean_video(1_500_000.0, 1280, 720, 30.0)).video_score >= 4.0);
}

#[test]
fn video_medium_layer() {
    assert!(score_one(clean_video(620_000.0, 640, 360, 15.0)).video_score >= 4.9);
    assert!(score_one(clean_video(550_000.0, 640, 360, 15.0)).video_score >= 4.5);
    assert!(score_one(clean_video(450_000.0, 640, 360, 15.0)).video_score >= 4.0);
    assert!(score_one(clean_video(350_000.0, 640, 360, 15.0)).video_score >= 3.5);
    assert!(score_one(clean_video(250_000.0, 640, 360, 15.0)).video_score >= 2.5);
}

#[test]
fn video_low_layer() {
    assert!(score_one(clean_video(310_000.0, 320, 180, 15.0)).video_score >= 4.9);
    assert!(score_one(clean_video(260_000.0, 320, 180, 15.0)).video_score >= 4.5);
    assert!(score_one(clean_video(210_000.0, 320, 180, 15.0)).video_score >= 4.0);
    assert!(score_one(clean_video(170_000.0, 320, 180, 15.0)).video_score >= 3.5);
    assert!(score_one(clean_video(110_000.0, 320, 180, 15.0)).video_score >= 2.5);
}

#[test]
fn video_spatial_layers_rendered_larger() {
    let upscale = |bitrate: f64, w: u32, h: u32, ew: u32, eh: u32| {
        let mut stat = clean_video(bitrate, w, h, 15.0);
        if let Some(video) = stat.video.as_mut() {
            video.expected_width = Some(ew);
            video.expected_height = Some(eh);
        }
        score_one(stat).video_score
    };

    let native_mid = score_one(clean_video(620_000.0, 640, 360, 15.0)).video_score;
    let high_mid = upscale(620_000.0, 640, 360, 1280, 720);
    let mid_low = upscale(310_000.0, 320, 180, 640, 360);
    let high_low = upscale(310_000.0, 320, 180, 1280, 720);

    assert!(high_mid < native_mid);
    assert_eq!(high_mid, 3.5);
    assert_eq!(mid_low, 3.5);
    assert_eq!(high_low, 2.75);
}

#[test]
fn video_scaled_score_keeps_full_precision() {
    // Default delays: 50 ms buffer plus half of a 50 ms RTT
    let mut stat = StreamStat::video(
        121_000.0,
        VideoParams::default()
            .with_resolution(640, 360)
            .with_frame_rate(15.0),
    );
    if let Some(video) = stat.video.as_mut() {
        video.expected_width = Some(1280);
        video.expected_height = Some(720);
    }
    // Unscaled 2.99, scaled by 0.7 without rounding again
    let score = score_one(stat).video_score;
    assert!((score - 2.093).abs() < 1e-12, "video_score = {score}");
}

#[test]
fn video_is_high_in_perfect_conditions() {
    let stat = StreamStat::video(
        13_000_000.0,
        VideoParams::default()
            .with_resolution(1280, 720)
            .with_frame_rate(30.0),
    );
    assert_between(score_one(stat).video_score, 4.8, 5.0);
}

#[test]
fn video_is_1_in_worst_bitrate_conditions() {
    let stat = StreamStat::video(1_000.0, VideoParams::default());
    assert_between(score_one(stat).video_score, 1.0, 1.1);
}

#[test]
fn video_is_1_in_worst_framerate_conditions() {
    let stat = StreamStat::video(
        10_000_000.0,
        VideoParams::default()
            .with_frame_rate(1.0)
            .with_expected_frame_rate(30.0),
    );
    assert_eq!(score_one(stat).video_score, 1.0);
}

#[test]
fn video_is_1_without_frames() {
    let stat = StreamStat::video(100_000.0, VideoParams::default().with_frame_rate(0.0));
    assert_eq!(score_one(stat).video_score, 1.0);

    let stat = StreamStat::video(
        200_000.0,
        VideoParams::default()
            .with_frame_rate(0.0)
            .with_expected_frame_rate(0.0),
    );
    assert_eq!(score_one(stat).video_score, 1.0);
}

#[test]
fn video_control_conditions() {
    let fps = |bitrate: f64, fps: f64| {
        StreamStat::video(bitrate, VideoParams::default().with_frame_rate(fps))
    };

    assert_between(
        score_one(StreamStat::video(400_000.0, VideoParams::default())).video_score,
        3.0,
        4.0,
    );
    assert_between(score_one(fps(200_000.0, 25.0)).video_score, 1.5, 2.5);

    let low_fps = StreamStat::video(
        500_000.0,
        VideoParams::default()
            .with_frame_rate(8.0)
            .with_expected_frame_rate(25.0),
    );
    assert_between(score_one(low_fps).video_score, 2.0, 3.0);

    let mismatch = StreamStat::video(
        400_000.0,
        VideoParams::default()
            .with_frame_rate(25.0)
            .with_expected_frame_rate(30.0),
    );
    assert_between(score_one(mismatch).video_score, 3.0, 4.0);

    let vga = |bitrate: f64| {
        StreamStat::video(
            bitrate,
            VideoParams::default()
                .with_resolution(640, 480)
                .with_frame_rate(20.0),
        )
    };
    assert_between(score_one(vga(300_000.0)).video_score, 3.0, 4.0);
    assert_between(score_one(vga(400_000.0)).video_score, 3.5, 4.5);
}

#[test]
fn video_depends_on_bitrate() {
    let (a, b) = score_two(
        StreamStat::video(200_000.0, VideoParams::default()),
        StreamStat::video(100_000.0, VideoParams::default()),
    );
    assert!(a.video_score > b.video_score);
}

#[test]
fn video_depends_on_codec() {
    let (vp9, vp8) = score_two(
        StreamStat::video(200_000.0, VideoParams::new("vp9")),
        StreamStat::video(200_000.0, VideoParams::new("vp8")),
    );
    assert!(vp9.video_score > vp8.video_score);

    let (av1, upper_vp9) = score_two(
        StreamStat::video(200_000.0, VideoParams::new("AV1")),
        StreamStat::video(200_000.0, VideoParams::new("VP9")),
    );
    assert!(av1.video_score > upper_vp9.video_score);
    assert_eq!(upper_vp9.video_score, vp9.video_score);
}

#[test]
fn video_depends_on_framerate() {
    let (a, b) = score_two(
        StreamStat::video(
            200_000.0,
            VideoParams::default()
                .with_frame_rate(15.0)
                .with_expected_frame_rate(15.0),
        ),
        StreamStat::video(
            200_000.0,
            VideoParams::default()
                .with_frame_rate(15.0)
                .with_expected_frame_rate(30.0),
        ),
    );
    assert!(a.video_score > b.video_score);
}

#[test]
fn video_depends_on_resolution() {
    let (small, large) = score_two(
        StreamStat::video(
            200_000.0,
            VideoParams::default()
                .with_resolution(100, 100)
                .with_expected_resolution(100, 100),
        ),
        StreamStat::video(
            200_000.0,
            VideoParams::default()
                .with_resolution(640, 480)
                .with_expected_resolution(640, 480),
        ),
    );
    assert!(small.video_score > large.video_score);
}
