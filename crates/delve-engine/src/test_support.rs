pub(crate) mod helpers {
    use chrono::Utc;

    use delve_core::entities::ResearchSession;
    use delve_core::inputs::FindingInput;

    use crate::engine::PhaseEngine;

    pub fn fresh_session() -> ResearchSession {
        ResearchSession::new(
            "rsn-0000beef".into(),
            "impact of AI in healthcare".into(),
            Utc::now(),
        )
    }

    pub fn subquestions(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("subquestion number {i}")).collect()
    }

    pub fn finding(url: &str) -> FindingInput {
        FindingInput {
            url: url.to_string(),
            title: "Source".into(),
            content: "Extracted content".into(),
            relevance_note: "Relevant".into(),
        }
    }

    pub fn session_in_decomposition(engine: &PhaseEngine) -> ResearchSession {
        let mut session = fresh_session();
        engine
            .elaborate(&mut session, "Clinical, operational, regulatory scope")
            .expect("elaborate");
        session
    }

    pub fn session_in_research(engine: &PhaseEngine, n: usize) -> ResearchSession {
        let mut session = session_in_decomposition(engine);
        engine
            .decompose(&mut session, &subquestions(n))
            .expect("decompose");
        session
    }

    pub fn session_in_synthesis(engine: &PhaseEngine, n: usize) -> ResearchSession {
        let mut session = session_in_research(engine, n);
        for index in 0..n {
            engine
                .record_findings(&mut session, index, &[finding("https://source.example")])
                .expect("record findings");
        }
        session
    }
}
