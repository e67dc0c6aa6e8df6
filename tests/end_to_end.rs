use std::fs;

use mlq_sim::{
    MlqScheduler, Quanta, Sim, SimError,
    io::{self, ReportFormat},
    metrics::ProcessMetrics,
    simulate,
};

fn run_file(input: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("input.txt");
    let out_path = dir.path().join("output.txt");
    fs::write(&in_path, input).unwrap();

    let specs = io::read_workload(&in_path).unwrap();
    let finished = simulate(specs, Quanta::default()).unwrap();
    io::write_report(&out_path, &finished, ReportFormat::Text).unwrap();
    fs::read_to_string(&out_path).unwrap()
}

#[test]
fn two_level1_processes_share_the_cpu() {
    let specs = io::parse_workload("P1;4;0;1;0\nP2;4;0;1;0\n");
    let finished = simulate(specs, Quanta::default()).unwrap();

    let p1 = finished.iter().find(|p| p.label == "P1").unwrap();
    let p2 = finished.iter().find(|p| p.label == "P2").unwrap();
    assert_eq!((p1.start, p1.completion), (0, 7));
    assert_eq!((p2.start, p2.completion), (3, 8));

    let m1 = ProcessMetrics::of(p1);
    let m2 = ProcessMetrics::of(p2);
    assert_eq!((m1.waiting, m1.response, m1.turnaround), (3, 0, 7));
    assert_eq!((m2.waiting, m2.response, m2.turnaround), (4, 3, 8));

    assert_eq!(
        run_file("P1;4;0;1;0\nP2;4;0;1;0\n"),
        "# label; BT; AT; Q; Pr; WT; CT; RT; TAT\n\
         P1;4;0;1;0;3;7;0;7\n\
         P2;4;0;1;0;4;8;3;8\n\
         \n\
         WT=3.5; CT=7.5; RT=1.5; TAT=7.5;\n"
    );
}

#[test]
fn empty_input_reports_header_only() {
    assert_eq!(
        run_file("# nothing here\n\n"),
        "# label; BT; AT; Q; Pr; WT; CT; RT; TAT\n"
    );
}

#[test]
fn lone_level3_process_runs_uninterrupted() {
    assert_eq!(
        run_file("C1;5;0;3;0\n"),
        "# label; BT; AT; Q; Pr; WT; CT; RT; TAT\n\
         C1;5;0;3;0;0;5;0;5\n\
         \n\
         WT=0.0; CT=5.0; RT=0.0; TAT=5.0;\n"
    );
}

#[test]
fn mixed_levels_report() {
    let input = "\
# label;BT;AT;Q;Pr
P1;5;0;1;2
P2;7;1;2;1
P3;4;2;3;5
P4;3;2;1;1
P5;6;10;2;0
P6;2;30;3;0
";
    assert_eq!(
        run_file(input),
        "# label; BT; AT; Q; Pr; WT; CT; RT; TAT\n\
         P1;5;0;1;2;3;8;0;8\n\
         P2;7;1;2;1;12;20;7;19\n\
         P3;4;2;3;5;19;25;19;23\n\
         P4;3;2;1;1;1;6;1;4\n\
         P5;6;10;2;0;5;21;3;11\n\
         P6;2;30;3;0;0;32;0;2\n\
         \n\
         WT=6.666666666666667; CT=18.666666666666668; RT=5.0; TAT=11.166666666666666;\n"
    );
}

#[test]
fn level3_preemption_report() {
    assert_eq!(
        run_file("X;4;0;3;0\nY;3;0;3;0\nH;2;1;2;0\n"),
        "# label; BT; AT; Q; Pr; WT; CT; RT; TAT\n\
         H;2;1;2;0;0;3;0;2\n\
         X;4;0;3;0;2;6;0;6\n\
         Y;3;0;3;0;6;9;6;9\n\
         \n\
         WT=2.6666666666666665; CT=6.0; RT=2.0; TAT=5.666666666666667;\n"
    );
}

#[test]
fn level3_yields_to_level1_report() {
    assert_eq!(
        run_file("X;4;0;3;0\nA;1;1;1;0\n"),
        "# label; BT; AT; Q; Pr; WT; CT; RT; TAT\n\
         A;1;1;1;0;0;2;0;1\n\
         X;4;0;3;0;1;5;0;5\n\
         \n\
         WT=0.5; CT=3.5; RT=0.0; TAT=3.0;\n"
    );
}

#[test]
fn negative_arrival_is_rejected_not_dropped() {
    let specs = io::parse_workload("A;2;-1;1;0\nB;1;0;2;0\n");
    assert_eq!(specs.len(), 2);
    assert_eq!(
        simulate(specs, Quanta::default()).unwrap_err(),
        SimError::InvalidArrivalTime {
            label: "A".into(),
            arrival: -1
        }
    );
}

#[test]
fn invalid_queue_is_rejected_before_running() {
    let specs = io::parse_workload("ok;1;0;1;0\nbad;2;0;5;0\n");
    assert_eq!(
        simulate(specs, Quanta::default()).unwrap_err(),
        SimError::InvalidQueueLevel {
            label: "bad".into(),
            level: 5
        }
    );
}

#[test]
fn timeline_covers_every_burst() {
    let specs = io::generate_workload(&io::GeneratorParams {
        ticks: 120,
        seed: 42,
        ..Default::default()
    });
    let outcome = Sim::new(specs, MlqScheduler::new(Quanta::new(2, 4).unwrap()))
        .unwrap()
        .run();
    let total: u64 = outcome.processes.iter().map(|p| p.burst).sum();
    let timeline = outcome.timeline();
    assert_eq!(timeline.busy_ticks(), total);
    for pair in timeline.slices.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
}
