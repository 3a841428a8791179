#[cfg(feature = "arbitrary")]
mod fuzz {
    use arbitrary::{Arbitrary, Unstructured};
    use scriptcraft::{
        analyze_text_description, generate_auto_suggestions, generate_frame_from_text,
        generate_storyboard_from_text, ElementId, ElementType, ScriptComposer, ScriptElement,
        StdRandom, StoryboardFrame, TranscriptionProject,
    };

    fn fill_deterministic(buf: &mut [u8], seed: u64) {
        let mut state = seed;
        for byte in buf.iter_mut() {
            // xorshift64*
            state ^= state >> 12;
            state ^= state << 25;
            state ^= state >> 27;
            state = state.wrapping_mul(0x2545_F491_4F6C_DD1D);
            *byte = (state & 0xFF) as u8;
        }
    }

    fn orders_are_contiguous(elements: &[ScriptElement]) -> bool {
        elements
            .iter()
            .enumerate()
            .all(|(index, element)| element.order as usize == index)
    }

    #[test]
    fn fuzz_storyboard_conversion_invariants() {
        let mut raw_data = [0u8; 1024 * 64];

        for i in 0..128u64 {
            fill_deterministic(&mut raw_data, 0xA11C_E55u64 ^ i);
            let mut u = Unstructured::new(&raw_data);

            if let Ok(frames) = Vec::<StoryboardFrame>::arbitrary(&mut u) {
                let script =
                    ScriptComposer::seeded(i).convert_storyboard_to_script(&frames);

                assert!(script.elements.len() >= frames.len());
                assert!(orders_are_contiguous(&script.elements));

                let cuts = script
                    .elements
                    .iter()
                    .filter(|element| element.element_type == ElementType::Transition)
                    .count();
                assert_eq!(cuts, frames.len().saturating_sub(1));
                if let Some(last) = script.elements.last() {
                    assert_ne!(last.element_type, ElementType::Transition);
                }

                let runtime = script.metadata.estimated_runtime;
                assert!(runtime >= 0.0, "runtime {runtime} for {} frames", frames.len());

                // serde_json writes non-finite floats as null.
                if runtime.is_finite() {
                    let json = script.to_json().expect("generated scripts serialize");
                    let reparsed =
                        scriptcraft::Script::from_json(&json).expect("serialized script parses");
                    assert_eq!(reparsed.content_digest(), script.content_digest());
                }
            }
        }
    }

    #[test]
    fn fuzz_transcription_processing() {
        let mut raw_data = [0u8; 1024 * 32];

        for i in 0..64u64 {
            fill_deterministic(&mut raw_data, 0x5EED_1234u64 ^ (i << 1));
            let mut u = Unstructured::new(&raw_data);
            if let Ok(mut project) = TranscriptionProject::arbitrary(&mut u) {
                let script = ScriptComposer::seeded(i).process_transcription(&project);
                assert_eq!(script.elements.len(), project.segments.len() * 2);
                assert!(orders_are_contiguous(&script.elements));

                let len = project.segments.len();
                let at = u.arbitrary::<usize>().unwrap_or(0) % 16;
                let index = u.arbitrary::<usize>().unwrap_or(0) % (len + 1);
                if project.split_segment(index, at).is_ok() {
                    assert_eq!(project.segments.len(), len + 1);
                }
                let len = project.segments.len();
                if project.merge_segments(index).is_ok() {
                    assert_eq!(project.segments.len(), len - 1);
                }
            }
        }
    }

    #[test]
    fn fuzz_text_heuristics_stay_in_bounds() {
        let mut raw_data = [0u8; 1024 * 16];

        for i in 0..128u64 {
            fill_deterministic(&mut raw_data, 0xC0FF_EE00u64 ^ i);
            let mut u = Unstructured::new(&raw_data);
            let Ok(text) = String::arbitrary(&mut u) else {
                continue;
            };

            let analysis = analyze_text_description(&text);
            assert!((0.0..=1.0).contains(&analysis.scene_complexity));
            assert!((0.0..=1.0).contains(&analysis.visual_interest));
            assert!((0.0..=1.0).contains(&analysis.narrative_pacing));
            assert!((0.3..=1.0).contains(&analysis.technical_feasibility));
            assert_eq!(analysis, analyze_text_description(&text));

            let frame = generate_frame_from_text(&text, i as u32);
            assert!((3.0..=15.0).contains(&frame.duration));
            assert!(!frame.title.is_empty());

            let storyboard = generate_storyboard_from_text(&text);
            for (order, frame) in storyboard.iter().enumerate() {
                assert_eq!(frame.order as usize, order);
            }

            let element_type = ElementType::ALL[(i as usize) % ElementType::ALL.len()];
            let element = ScriptElement::new(
                ElementId::from_random_bytes([i as u8; 16]),
                element_type,
                text.clone(),
                0,
            );
            for suggestion in generate_auto_suggestions(&element, "fuzz") {
                assert!((0.0..=1.0).contains(&suggestion.confidence));
            }

            let mut composer = ScriptComposer::with_random(StdRandom::seeded(i));
            let _ = composer
                .generate_voiceover_narration(&text, scriptcraft::NarrationStyle::Narrative);
        }
    }
}
