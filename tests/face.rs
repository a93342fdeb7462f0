mod tests {
    use french_word_clock::face::{
        FaceDiagnostic, Word, WordClockCompiler, hour_phrase, minute_phrase,
    };
    use french_word_clock::topology::{Corner, SensorPosition, TopologyMapper};

    const HOUR_WORDS: [Word; 15] = [
        Word::Une,
        Word::Deux,
        Word::Trois,
        Word::Quatre,
        Word::Cinq,
        Word::Six,
        Word::Sept,
        Word::Huit,
        Word::Neuf,
        Word::Dix,
        Word::Onze,
        Word::Heure,
        Word::Heures,
        Word::Midi,
        Word::Minuit,
    ];

    fn lit_corners(compiler: &WordClockCompiler) -> usize {
        Corner::ALL
            .iter()
            .filter(|corner| compiler.shows_corner(**corner))
            .count()
    }

    fn letters(words: &[Word]) -> usize {
        words
            .iter()
            .map(|word| usize::from(word.segment().length))
            .sum()
    }

    #[test]
    fn test_one_o_clock() {
        let mut compiler = WordClockCompiler::new(SensorPosition::Top);
        let (changed, state) = compiler.compile(1, 0, 0);
        assert!(changed);
        assert_eq!(
            state.lit_count(),
            letters(&[Word::Il, Word::Est, Word::Une, Word::Heure])
        );
        for word in [Word::Il, Word::Est, Word::Une, Word::Heure] {
            assert!(compiler.shows(word), "{word:?} should be lit");
        }
        assert!(!compiler.shows(Word::Heures));
        assert_eq!(lit_corners(&compiler), 0);
        assert!(compiler.diagnostics().is_empty());
    }

    #[test]
    fn test_same_minute_is_a_no_op() {
        let mut compiler = WordClockCompiler::default();
        assert!(compiler.compile(10, 20, 0).0);
        let before = compiler.state().clone();
        let (changed, state) = compiler.compile(10, 20, 59);
        assert!(!changed);
        assert_eq!(*state, before);
        assert!(compiler.compile(10, 21, 0).0);
    }

    #[test]
    fn test_midnight_quarter_past() {
        let mut compiler = WordClockCompiler::default();
        let (_, state) = compiler.compile(0, 15, 0);
        let expected = [Word::Il, Word::Est, Word::Minuit, Word::Et, Word::Quart];
        assert_eq!(state.lit_count(), letters(&expected));
        for word in expected {
            assert!(compiler.shows(word), "{word:?} should be lit");
        }
    }

    #[test]
    fn test_quarter_to_midnight_with_leftover() {
        let mut compiler = WordClockCompiler::default();
        let (_, state) = compiler.compile(23, 47, 0);
        let expected = [
            Word::Il,
            Word::Est,
            Word::Minuit,
            Word::Moins,
            Word::Le,
            Word::Quart,
        ];
        assert_eq!(state.lit_count(), letters(&expected) + 2);
        for word in expected {
            assert!(compiler.shows(word), "{word:?} should be lit");
        }
        assert!(!compiler.shows(Word::Onze));
        assert!(compiler.shows_corner(Corner::TopRight));
        assert!(compiler.shows_corner(Corner::BottomRight));
        assert!(!compiler.shows_corner(Corner::BottomLeft));
        assert!(!compiler.shows_corner(Corner::TopLeft));
    }

    #[test]
    fn test_corners_follow_sensor_position() {
        let mut compiler = WordClockCompiler::new(SensorPosition::Bottom);
        let (_, state) = compiler.compile(23, 47, 0);
        assert!(!state.is_lit(0));
        assert!(!state.is_lit(1));
        assert!(state.is_lit(2));
        assert!(state.is_lit(3));
    }

    #[test]
    fn test_leftover_corner_precedence() {
        let order = [
            Corner::TopRight,
            Corner::BottomRight,
            Corner::BottomLeft,
            Corner::TopLeft,
        ];
        let mut compiler = WordClockCompiler::default();
        for leftover in 0..5u8 {
            compiler.compile(8, 10 + leftover, 0);
            for (rank, corner) in order.iter().enumerate() {
                assert_eq!(
                    compiler.shows_corner(*corner),
                    rank < usize::from(leftover),
                    "leftover {leftover}, corner {corner:?}"
                );
            }
        }
    }

    #[test]
    fn test_corners_clear_on_next_minute() {
        let mut compiler = WordClockCompiler::default();
        compiler.compile(8, 14, 0);
        assert_eq!(lit_corners(&compiler), 4);
        compiler.compile(8, 15, 0);
        assert_eq!(lit_corners(&compiler), 0);
    }

    #[test]
    fn test_rounding_covers_every_minute() {
        let mut compiler = WordClockCompiler::default();
        for minute in 0..60u8 {
            let leftover = minute % 5;
            let rounded = minute - leftover;
            assert_eq!(rounded + leftover, minute);
            assert!(leftover <= 4);

            compiler.compile(14, minute, 0);
            assert_eq!(lit_corners(&compiler), usize::from(leftover));
            assert!(compiler.diagnostics().is_empty());
        }
    }

    #[test]
    fn test_hour_wraps_from_twenty_five_to() {
        for hour in 0..24u8 {
            let mut to = WordClockCompiler::default();
            to.compile(hour, 40, 0);
            let mut on = WordClockCompiler::default();
            on.compile((hour + 1) % 24, 0, 0);
            for word in HOUR_WORDS {
                assert_eq!(
                    to.shows(word),
                    on.shows(word),
                    "hour {hour}, word {word:?}"
                );
            }
        }
    }

    #[test]
    fn test_noon_has_no_suffix() {
        let mut compiler = WordClockCompiler::default();
        compiler.compile(12, 30, 0);
        assert!(compiler.shows(Word::Midi));
        assert!(compiler.shows(Word::Et));
        assert!(compiler.shows(Word::Demi));
        assert!(!compiler.shows(Word::Heure));
    }

    #[test]
    fn test_afternoon_uses_twelve_hour_names() {
        let mut compiler = WordClockCompiler::default();
        compiler.compile(17, 5, 0);
        assert!(compiler.shows(Word::Cinq));
        assert!(compiler.shows(Word::Heures));
        assert!(compiler.shows(Word::MinuteCinq));

        compiler.compile(13, 55, 0);
        assert!(compiler.shows(Word::Deux));
        assert!(compiler.shows(Word::Moins));
        assert!(compiler.shows(Word::MinuteCinq));
    }

    #[test]
    fn test_invalid_hour_is_reported() {
        let mut compiler = WordClockCompiler::default();
        let (changed, state) = compiler.compile(24, 0, 0);
        assert!(changed);
        assert_eq!(state.lit_count(), letters(&[Word::Il, Word::Est]));
        assert_eq!(compiler.diagnostics(), &[FaceDiagnostic::InvalidHour(24)]);

        compiler.compile(7, 0, 0);
        assert!(compiler.diagnostics().is_empty());
    }

    #[test]
    fn test_next_hour_wraps_modulo_a_day() {
        let mut compiler = WordClockCompiler::default();
        // 255 + 1 is 256, which is 16 modulo 24
        compiler.compile(255, 40, 0);
        assert!(compiler.diagnostics().is_empty());
        assert!(compiler.shows(Word::Quatre));
        assert!(compiler.shows(Word::Heures));
        assert!(compiler.shows(Word::Moins));
        assert!(compiler.shows(Word::Vingt));

        compiler.compile(254, 40, 0);
        assert!(compiler.shows(Word::Trois));

        compiler.compile(255, 20, 0);
        assert_eq!(compiler.diagnostics(), &[FaceDiagnostic::InvalidHour(255)]);
    }

    #[test]
    fn test_invalid_minute_is_reported() {
        let mut compiler = WordClockCompiler::default();
        compiler.compile(3, 60, 0);
        assert_eq!(compiler.diagnostics(), &[FaceDiagnostic::InvalidMinute(60)]);
        assert!(compiler.shows(Word::Quatre));
        assert!(compiler.shows(Word::Heures));
        assert!(!compiler.shows(Word::Moins));
    }

    #[test]
    fn test_sensor_change_invalidates_cache() {
        let mut compiler = WordClockCompiler::new(SensorPosition::Top);
        let top = compiler.compile(1, 0, 0).1.clone();
        compiler.set_sensor_position(SensorPosition::Bottom);
        let (changed, bottom) = compiler.compile(1, 0, 0);
        assert!(changed);
        assert_ne!(*bottom, top);

        let mapper = TopologyMapper::new();
        let segment = Word::Une.segment();
        assert!(bottom.is_lit(mapper.map(segment.x, segment.y, SensorPosition::Bottom)));
        assert!(compiler.shows(Word::Une));
    }

    #[test]
    fn test_phrase_tables() {
        assert_eq!(hour_phrase(0), Some(&[Word::Minuit][..]));
        assert_eq!(hour_phrase(13), Some(&[Word::Une, Word::Heure][..]));
        assert_eq!(hour_phrase(24), None);

        assert_eq!(minute_phrase(0), Some(&[][..]));
        assert_eq!(minute_phrase(15), Some(&[Word::Et, Word::Quart][..]));
        assert_eq!(minute_phrase(30), Some(&[Word::Et, Word::Demi][..]));
        assert_eq!(
            minute_phrase(45),
            Some(&[Word::Moins, Word::Le, Word::Quart][..])
        );
        assert_eq!(minute_phrase(7), None);
    }
}
