use chronobench_core::generate::{GeneratorOptions, GeneratorOutcome, QuestionGenerator, SkipReason};
use chronobench_core::model::{Answer, Fact, QuestionKind, YearValue};
use chronobench_nlp::RuleLemmatizer;

fn obama_point() -> Fact {
    Fact::at("Obama", "was president of", "USA", 2009)
}

fn obama_span() -> Fact {
    Fact::spanning("Obama", "was president of", "USA", 2009, 2017)
}

fn generator(options: GeneratorOptions) -> (RuleLemmatizer, GeneratorOptions) {
    (RuleLemmatizer::new(), options)
}

#[test]
fn yes_no_single_year_no_distractors() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.yes_no(&obama_point()).unwrap();
    let questions = outcome.questions().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(
        questions[0].text,
        "Was Obama president of USA in the year 2009?"
    );
    assert_eq!(questions[0].answer, Answer::YesNo(true));
}

#[test]
fn yes_no_distractors_come_first() {
    let mut options = GeneratorOptions::new();
    options.falsy_year_count = Some(1);
    let (lemmatizer, options) = generator(options);
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.yes_no(&obama_point()).unwrap();
    let questions = outcome.questions().unwrap();
    assert_eq!(questions.len(), 3);
    assert!(questions[0].text.contains("2008"));
    assert_eq!(questions[0].answer, Answer::YesNo(false));
    assert!(questions[1].text.contains("2010"));
    assert_eq!(questions[1].answer, Answer::YesNo(false));
    assert!(questions[2].text.contains("2009"));
    assert_eq!(questions[2].answer, Answer::YesNo(true));
}

#[test]
fn yes_no_two_distractors_each_side() {
    let mut options = GeneratorOptions::new();
    options.falsy_year_count = Some(2);
    let (lemmatizer, options) = generator(options);
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.yes_no(&obama_point()).unwrap();
    let falsy: Vec<&str> = outcome
        .questions()
        .unwrap()
        .iter()
        .filter(|q| q.answer == Answer::YesNo(false))
        .map(|q| q.text.as_str())
        .collect();
    assert_eq!(falsy.len(), 4);
    assert!(falsy[0].contains("2007"));
    assert!(falsy[1].contains("2008"));
    assert!(falsy[2].contains("2010"));
    assert!(falsy[3].contains("2011"));
}

#[test]
fn yes_no_all_interval_years() {
    let mut options = GeneratorOptions::new();
    options.all_interval_years = true;
    let (lemmatizer, options) = generator(options);
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.yes_no(&obama_span()).unwrap();
    assert_eq!(outcome.questions().unwrap().len(), 9);
}

#[test]
fn yes_no_boundary_year_only_by_default() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.yes_no(&obama_span()).unwrap();
    let questions = outcome.questions().unwrap();
    assert_eq!(questions.len(), 1);
    assert!(questions[0].text.contains("2009"));
}

#[test]
fn yes_no_without_year_hint() {
    let mut options = GeneratorOptions::new();
    options.show_year_hint = false;
    let (lemmatizer, options) = generator(options);
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.yes_no(&obama_point()).unwrap();
    assert_eq!(
        outcome.questions().unwrap()[0].text,
        "Was Obama president of USA in 2009?"
    );
}

#[test]
fn yes_no_did_for_plain_verbs() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let fact = Fact::at("Messi", "played for", "Barcelona", 2004);
    let outcome = gen.yes_no(&fact).unwrap();
    assert_eq!(
        outcome.questions().unwrap()[0].text,
        "Did Messi play for Barcelona in the year 2004?"
    );
}

#[test]
fn yes_no_custom_template_wins() {
    let mut options = GeneratorOptions::new();
    options
        .overrides
        .set(QuestionKind::YesNo, "was born in", "Was {} born in {} in {}?")
        .unwrap();
    let (lemmatizer, options) = generator(options);
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let fact = Fact::at("Obama", "was born in", "Hawaii", 1961);
    let outcome = gen.yes_no(&fact).unwrap();
    assert_eq!(
        outcome.questions().unwrap()[0].text,
        "Was Obama born in Hawaii in 1961?"
    );
}

#[test]
fn simple_when_point_fact() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.simple_when(&obama_point()).unwrap();
    let questions = outcome.questions().unwrap();
    assert_eq!(
        questions[0].text,
        "In which year was Obama president of USA?"
    );
    assert_eq!(questions[0].answer, Answer::Years(vec![2009]));
}

#[test]
fn simple_when_span_answers_every_year() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.simple_when(&obama_span()).unwrap();
    let Answer::Years(years) = &outcome.questions().unwrap()[0].answer else {
        panic!("expected a year list");
    };
    assert_eq!(years.len(), 9);
    assert_eq!(years[0], 2009);
    assert_eq!(years[8], 2017);
}

#[test]
fn when_to_when_skips_point_facts() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.when_to_when(&obama_point()).unwrap();
    assert_eq!(
        outcome,
        GeneratorOutcome::Skipped(SkipReason::IntervalRequired)
    );
}

#[test]
fn when_to_when_skips_explicit_equal_until() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let fact = Fact::spanning("Obama", "was president of", "USA", 2009, 2009);
    assert!(gen.when_to_when(&fact).unwrap().is_skipped());
}

#[test]
fn when_to_when_question_text() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.when_to_when(&obama_span()).unwrap();
    assert_eq!(
        outcome.questions().unwrap()[0].text,
        "From which year until which year was Obama president of USA?"
    );
}

#[test]
fn from_and_until_boundaries() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let from = gen.from_question(&obama_span()).unwrap();
    assert_eq!(from.questions().unwrap()[0].answer, Answer::Year(2009));
    assert_eq!(
        from.questions().unwrap()[0].text,
        "From which year was Obama president of USA?"
    );

    let until = gen.until_question(&obama_span()).unwrap();
    assert_eq!(until.questions().unwrap()[0].answer, Answer::Year(2017));
    assert_eq!(
        until.questions().unwrap()[0].text,
        "Until which year was Obama president of USA?"
    );
}

#[test]
fn open_interval_questions_name_the_known_bound() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let right = gen.right_open(&obama_span()).unwrap();
    assert_eq!(
        right.questions().unwrap()[0].text,
        "From the year 2009 until which year was Obama president of USA?"
    );
    assert_eq!(right.questions().unwrap()[0].answer, Answer::Year(2017));

    let left = gen.left_open(&obama_span()).unwrap();
    assert_eq!(
        left.questions().unwrap()[0].text,
        "From which year until the year 2017 was Obama president of USA?"
    );
    assert_eq!(left.questions().unwrap()[0].answer, Answer::Year(2009));
}

#[test]
fn open_interval_custom_template_shows_opposite_bound() {
    let mut options = GeneratorOptions::new();
    options
        .overrides
        .set(
            QuestionKind::RightOpen,
            "was president of",
            "Until the year {} {} was president of {} and when was the election?",
        )
        .unwrap();
    let (lemmatizer, options) = generator(options);
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let outcome = gen.right_open(&obama_span()).unwrap();
    let question = &outcome.questions().unwrap()[0];
    assert_eq!(
        question.text,
        "Until the year 2017 Obama was president of USA and when was the election?"
    );
    assert_eq!(question.answer, Answer::Year(2009));
}

#[test]
fn duration_answer_is_span_length() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let fact = Fact::spanning("Obama", "was president of", "USA", 2009, 2013);
    let outcome = gen.duration(&fact).unwrap();
    let question = &outcome.questions().unwrap()[0];
    assert_eq!(question.answer, Answer::Duration(4));
    assert_eq!(
        question.text,
        "For how many years was Obama president of USA?"
    );
}

#[test]
fn duration_skips_point_facts() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);
    assert!(gen.duration(&obama_point()).unwrap().is_skipped());
}

#[test]
fn reversed_interval_is_normalized_before_generation() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let fact = Fact::spanning("Obama", "was president of", "USA", 2017, 2009);
    let outcome = gen.from_question(&fact).unwrap();
    assert_eq!(outcome.questions().unwrap()[0].answer, Answer::Year(2009));
}

#[test]
fn reserved_kinds_skip() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    for kind in [QuestionKind::BeforeAfter, QuestionKind::While] {
        assert_eq!(
            gen.generate(kind, &obama_span()).unwrap(),
            GeneratorOutcome::Skipped(SkipReason::NotImplemented)
        );
    }
}

#[test]
fn batch_counts_skips_per_kind() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let facts = vec![obama_point(), obama_span()];
    let kinds = [QuestionKind::YesNo, QuestionKind::WhenToWhen, QuestionKind::Duration];
    let batch = gen.generate_batch(&kinds, &facts).unwrap();

    // yes/no for both facts, when-to-when and duration only for the span
    assert_eq!(batch.questions.len(), 4);
    assert_eq!(batch.skipped.get("when_to_when"), Some(&1));
    assert_eq!(batch.skipped.get("duration"), Some(&1));
    assert_eq!(batch.skipped.get("yes_no"), None);
    assert_eq!(batch.questions[0].fact_index, 0);
    assert_eq!(batch.questions[0].predicate, "was president of");
}

#[test]
fn invalid_year_propagates() {
    let (lemmatizer, options) = generator(GeneratorOptions::new());
    let gen = QuestionGenerator::new(&lemmatizer, options);

    let mut fact = obama_point();
    fact.time_from = YearValue::Text("20o9".into());
    assert!(gen.yes_no(&fact).is_err());
}
