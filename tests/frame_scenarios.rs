//! Frame-by-frame scenarios driven with synthetic spectra.

use glam::Vec3;

use vibesphere::audio::{AudioAccessDenied, AudioInput, DeniedReason, FrequencySource};
use vibesphere::params::{ColorMode, Deformation, LevelParams, ShapeParams};
use vibesphere::sphere::{Shading, SphereSystem};

const BINS: usize = 1024;

fn shape(deformation: Deformation) -> ShapeParams {
    ShapeParams {
        segments_width: 32,
        segments_height: 24,
        deformation,
        ..ShapeParams::default()
    }
}

fn positions(sphere: &SphereSystem) -> Vec<[f32; 3]> {
    sphere.mesh.vertices.iter().map(|v| v.position).collect()
}

fn normals(sphere: &SphereSystem) -> Vec<[f32; 3]> {
    sphere.mesh.vertices.iter().map(|v| v.normal).collect()
}

fn template(sphere: &SphereSystem) -> Vec<[f32; 3]> {
    sphere.mesh.template().iter().map(|p| p.to_array()).collect()
}

#[test]
fn silence_settles_on_a_perfect_sphere() {
    let mut sphere = SphereSystem::new(LevelParams::default(), shape(Deformation::Ripple));
    let silent = vec![0u8; BINS];

    let mut out = sphere.update(Some(&silent), 0.0);
    for frame in 1..300 {
        out = sphere.update(Some(&silent), frame as f32 / 60.0);
    }

    assert_eq!(out.level.raw, 0.0);
    assert_eq!(out.level.smoothed, 0.0);
    assert_eq!(out.level.boosted, 0.0);
    assert_eq!(out.scale, 1.0);

    let radius = sphere.mesh.radius();
    for p in positions(&sphere) {
        assert!((Vec3::from_array(p).length() - radius).abs() < 1e-5);
    }
}

#[test]
fn idle_frames_are_bit_identical_to_template_after_speech() {
    for deformation in [Deformation::Ripple, Deformation::Layered] {
        let mut sphere = SphereSystem::new(LevelParams::default(), shape(deformation));
        let rest_normals = normals(&sphere);
        let loud = vec![255u8; BINS];

        for frame in 0..30 {
            sphere.update(Some(&loud), frame as f32 / 60.0);
        }
        assert_ne!(positions(&sphere), template(&sphere));
        assert_ne!(normals(&sphere), rest_normals);

        // Force the smoothed level under the gate by decaying with no source
        let mut frame = 30;
        loop {
            let out = sphere.update(None, frame as f32 / 60.0);
            frame += 1;
            if out.level.boosted == 0.0 {
                break;
            }
        }

        let first = positions(&sphere);
        sphere.update(None, frame as f32 / 60.0);
        let second = positions(&sphere);

        assert_eq!(first, template(&sphere));
        assert_eq!(second, template(&sphere));
        assert_eq!(normals(&sphere), rest_normals);
    }
}

#[test]
fn speaking_reshades_the_surface() {
    let mut sphere = SphereSystem::new(LevelParams::default(), shape(Deformation::Layered));
    let resting = normals(&sphere);

    sphere.update(Some(&[255u8; BINS]), 0.7);
    let speaking = normals(&sphere);
    assert_ne!(speaking, resting);

    for n in &speaking {
        assert!((Vec3::from_array(*n).length() - 1.0).abs() < 1e-4);
    }

    let level = sphere.estimator().smoothed();
    assert!((level - 0.45).abs() < 1e-6);
    assert_eq!(sphere.estimator().params().threshold, 0.04);
}

#[test]
fn sustained_loudness_saturates() {
    let mut sphere = SphereSystem::new(LevelParams::default(), shape(Deformation::Ripple));
    let loud = vec![255u8; BINS];

    let mut out = sphere.update(Some(&loud), 0.0);
    for frame in 1..60 {
        out = sphere.update(Some(&loud), frame as f32 / 60.0);
    }

    assert!(out.level.smoothed > 0.99);
    assert_eq!(out.level.boosted, 1.0);
    assert_eq!(out.scale, 3.0);

    let before = sphere.driver().rotation();
    let after = sphere.update(Some(&loud), 1.0).rotation;
    assert!((after.x - before.x - 0.042).abs() < 1e-4);
    assert!((after.y - before.y - 0.085).abs() < 1e-4);

    match sphere.update(Some(&loud), 1.1).shading {
        Shading::Material(m) => {
            assert_eq!(m.color[0], 1.0);
            assert!((m.emissive_intensity - 3.2).abs() < 1e-6);
        }
        other => panic!("unexpected shading {:?}", other),
    }
}

#[test]
fn impulse_then_silence() {
    let mut sphere = SphereSystem::new(LevelParams::default(), shape(Deformation::Ripple));

    let out = sphere.update(Some(&[255u8; BINS]), 0.0);
    assert!((out.level.smoothed - 0.45).abs() < 1e-6);

    let out = sphere.update(Some(&[0u8; BINS]), 1.0 / 60.0);
    assert!((out.level.smoothed - 0.414).abs() < 1e-6);
    assert!(out.level.boosted > 0.0);
}

#[test]
fn background_noise_is_gated() {
    let mut sphere = SphereSystem::new(LevelParams::default(), shape(Deformation::Layered));

    // Mean of 8/255 ≈ 0.031, under the 0.04 gate even when fully smoothed
    let hum = vec![8u8; BINS];
    for frame in 0..200 {
        let out = sphere.update(Some(&hum), frame as f32 / 60.0);
        assert_eq!(out.level.boosted, 0.0);
        assert_eq!(out.scale, 1.0);
    }
    assert_eq!(positions(&sphere), template(&sphere));
}

#[test]
fn rim_mode_follows_level_and_time() {
    let params = ShapeParams {
        color_mode: ColorMode::Rim,
        ..shape(Deformation::Layered)
    };
    let mut sphere = SphereSystem::new(LevelParams::default(), params);

    let quiet = sphere.update(None, 2.0);
    let Shading::Rim(glow) = quiet.shading else {
        panic!("expected rim shading");
    };
    assert_eq!(glow.strength, 0.0);
    assert!((glow.hue - 0.4).abs() < 1e-5);

    let loud = sphere.update(Some(&[255u8; BINS]), 2.0);
    let Shading::Rim(glow) = loud.shading else {
        panic!("expected rim shading");
    };
    assert!((glow.strength - loud.level.boosted * 2.5).abs() < 1e-6);
}

/// Input that always refuses, as a denied microphone would
struct DeniedInput;

impl AudioInput for DeniedInput {
    fn request_stream(&mut self) -> Result<Box<dyn FrequencySource>, AudioAccessDenied> {
        Err(AudioAccessDenied::permission_denied("Permission denied by user"))
    }
}

/// Input that replays a fixed script of spectra, one per frame
struct ScriptedInput(Vec<Vec<u8>>);

struct ScriptedSource {
    frames: Vec<Vec<u8>>,
    next: usize,
}

impl AudioInput for ScriptedInput {
    fn request_stream(&mut self) -> Result<Box<dyn FrequencySource>, AudioAccessDenied> {
        Ok(Box::new(ScriptedSource {
            frames: std::mem::take(&mut self.0),
            next: 0,
        }))
    }
}

impl FrequencySource for ScriptedSource {
    fn bin_count(&self) -> usize {
        BINS
    }

    fn frequency_snapshot(&mut self, out: &mut [u8]) {
        match self.frames.get(self.next) {
            Some(frame) => out.copy_from_slice(frame),
            None => out.fill(0),
        }
        self.next += 1;
    }
}

/// Frame loop as the application runs it
fn run(input: &mut dyn AudioInput, frames: usize) -> (Vec<f32>, Option<AudioAccessDenied>) {
    let mut sphere = SphereSystem::new(LevelParams::default(), shape(Deformation::Ripple));
    let (mut source, error) = match input.request_stream() {
        Ok(source) => (Some(source), None),
        Err(e) => (None, Some(e)),
    };
    let mut bins = vec![0u8; BINS];

    let mut boosted = Vec::new();
    for frame in 0..frames {
        let snapshot = match source.as_mut() {
            Some(s) => {
                s.frequency_snapshot(&mut bins);
                Some(bins.as_slice())
            }
            None => None,
        };
        boosted.push(sphere.update(snapshot, frame as f32 / 60.0).level.boosted);
    }
    (boosted, error)
}

#[test]
fn denied_audio_keeps_sphere_idle() {
    let (boosted, error) = run(&mut DeniedInput, 120);
    let error = error.expect("access should be denied");
    assert_eq!(error.reason, DeniedReason::PermissionDenied);
    assert!(error.to_string().contains("Permission denied by user"));
    assert!(boosted.iter().all(|&b| b == 0.0));
}

#[test]
fn scripted_speech_rises_then_fades() {
    let mut script = vec![vec![0u8; BINS]; 10];
    script.extend(vec![vec![200u8; BINS]; 20]);
    let (boosted, error) = run(&mut ScriptedInput(script), 200);

    assert!(error.is_none());
    assert!(boosted[..10].iter().all(|&b| b == 0.0));
    assert!(boosted[10] > 0.0); // Fast attack
    assert!(boosted[29] > 0.9);

    // Slow release: still active shortly after speech stops, silent much later
    assert!(boosted[35] > 0.0);
    assert_eq!(boosted[199], 0.0);
}
