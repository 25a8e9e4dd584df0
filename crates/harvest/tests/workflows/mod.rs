use super::*;

const PAPERS: [(&str, &str); 5] = [
  ("2401.00005v1", "Fifth Submitted, First Listed"),
  ("2401.00004v1", "Fourth Submitted"),
  ("2401.00003v2", "Third Submitted"),
  ("2401.00002v1", "Second Submitted"),
  ("2401.00001v1", "First Submitted, Last Listed"),
];

#[traced_test]
#[tokio::test]
async fn test_tally_with_existing_and_rejected() -> TestResult<()> {
  let server = upstream(&PAPERS).await;
  serve_pdf(&server, "2401.00005v1", b"%PDF one", 1).await;
  serve_pdf(&server, "2401.00004v1", b"%PDF two", 0).await;
  serve_pdf(&server, "2401.00003v2", b"%PDF three", 1).await;
  reject_pdf(&server, "2401.00002v1", 404, 1).await;
  serve_pdf(&server, "2401.00001v1", b"%PDF five", 1).await;

  let (config, _dir) = test_config(&server);
  std::fs::create_dir_all(&config.output_dir)?;
  std::fs::write(config.output_dir.join("2401.00004v1.pdf"), b"already here")?;

  let (summary, events, pauses) = run_counted(config.clone()).await?;
  server.verify().await;

  assert_eq!(summary.found, 5);
  assert_eq!(summary.downloaded, 4);
  assert_eq!(summary.saved, 3);
  assert_eq!(summary.skipped, 1);
  assert_eq!(summary.failed, 1);
  assert_eq!(summary.rejection, None);
  assert_eq!(summary.output_dir, config.output_dir);

  assert_eq!(files_in(&config.output_dir), vec![
    "2401.00001v1.pdf",
    "2401.00003v2.pdf",
    "2401.00004v1.pdf",
    "2401.00005v1.pdf",
  ]);
  assert_eq!(std::fs::read(config.output_dir.join("2401.00004v1.pdf"))?, b"already here");
  assert_eq!(std::fs::read(config.output_dir.join("2401.00003v2.pdf"))?, b"%PDF three");

  // Downloads 1 and 3 succeed and each is followed by another download request.
  assert_eq!(pauses, 2);

  let failed_url = format!("{}/pdf/2401.00002v1", server.uri());
  assert_eq!(events, vec![
    Event::FetchStarted(10),
    Event::Found(5),
    Event::Downloading(1, "Fifth Submitted, First Listed".into()),
    Event::Saved(1, 8),
    Event::Skipped(2, "2401.00004v1.pdf".into()),
    Event::Downloading(3, "Third Submitted".into()),
    Event::Saved(3, 10),
    Event::Downloading(4, "Second Submitted".into()),
    Event::Failed(4, failed_url),
    Event::Downloading(5, "First Submitted, Last Listed".into()),
    Event::Saved(5, 9),
    Event::Finished(4),
  ]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_courtesy_delay_between_downloads_only() -> TestResult<()> {
  let papers = &PAPERS[..3];
  let server = upstream(papers).await;
  for (id, _) in papers {
    serve_pdf(&server, id, b"%PDF", 1).await;
  }

  let (config, _dir) = test_config(&server);
  let (summary, _, pauses) = run_counted(config).await?;

  assert_eq!(summary.saved, 3);
  assert_eq!(pauses, 2);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_no_delay_after_failure_or_skip() -> TestResult<()> {
  let papers = &PAPERS[..3];
  let server = upstream(papers).await;
  reject_pdf(&server, "2401.00005v1", 503, 1).await;
  serve_pdf(&server, "2401.00004v1", b"%PDF", 1).await;

  let (config, _dir) = test_config(&server);
  std::fs::create_dir_all(&config.output_dir)?;
  std::fs::write(config.output_dir.join("2401.00003v2.pdf"), b"%PDF")?;

  let (summary, _, pauses) = run_counted(config).await?;

  assert_eq!(summary.failed, 1);
  assert_eq!(summary.saved, 1);
  assert_eq!(summary.skipped, 1);
  assert_eq!(summary.downloaded, 2);
  // The failure is not followed by a delay, and the final success has nothing after it.
  assert_eq!(pauses, 0);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_second_run_is_idempotent() -> TestResult<()> {
  let papers = &PAPERS[..3];
  let server = upstream(papers).await;
  for (id, _) in papers {
    serve_pdf(&server, id, id.as_bytes(), 1).await;
  }

  let (config, _dir) = test_config(&server);

  let (first, _, _) = run_counted(config.clone()).await?;
  let files_after_first = files_in(&config.output_dir);

  let (second, events, pauses) = run_counted(config.clone()).await?;
  server.verify().await;

  assert_eq!(first.saved, 3);
  assert_eq!(second.saved, 0);
  assert_eq!(second.skipped, 3);
  assert_eq!(second.downloaded, first.downloaded);
  assert_eq!(pauses, 0);
  assert_eq!(files_in(&config.output_dir), files_after_first);
  assert!(events.iter().all(|event| !matches!(event, Event::Downloading(..))));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_rejected_download_is_retried_next_run() -> TestResult<()> {
  let papers = &PAPERS[..1];
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .respond_with(ResponseTemplate::new(200).set_body_string(feed(&server.uri(), papers)))
    .mount(&server)
    .await;
  // The first request fails, later ones succeed.
  Mock::given(method("GET"))
    .and(path("/pdf/2401.00005v1"))
    .respond_with(ResponseTemplate::new(500))
    .up_to_n_times(1)
    .expect(1)
    .mount(&server)
    .await;
  serve_pdf(&server, "2401.00005v1", b"%PDF finally", 1).await;

  let (config, _dir) = test_config(&server);

  let (first, _, _) = run_counted(config.clone()).await?;
  assert_eq!(first.failed, 1);
  assert!(files_in(&config.output_dir).is_empty());

  let (second, _, _) = run_counted(config.clone()).await?;
  assert_eq!(second.saved, 1);
  assert_eq!(std::fs::read(config.output_dir.join("2401.00005v1.pdf"))?, b"%PDF finally");
  server.verify().await;
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_rejected_metadata_query_runs_empty() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .respond_with(ResponseTemplate::new(500))
    .expect(1)
    .mount(&server)
    .await;

  let (config, _dir) = test_config(&server);
  let (summary, events, pauses) = run_counted(config.clone()).await?;

  assert_eq!(summary.found, 0);
  assert_eq!(summary.downloaded, 0);
  assert_eq!(summary.rejection.map(|r| r.status.as_u16()), Some(500));
  assert_eq!(pauses, 0);
  assert!(config.output_dir.is_dir());
  assert_eq!(events, vec![
    Event::FetchStarted(10),
    Event::FetchRejected(500),
    Event::Found(0),
    Event::Finished(0),
  ]);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_malformed_feed_aborts_run() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<feed><entry><id>x</feed>"))
    .mount(&server)
    .await;

  let (config, _dir) = test_config(&server);
  let result = Pipeline::new(config)?.run(&mut ()).await;
  assert!(matches!(result, Err(HarvestError::Xml(_))));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_discover_leaves_disk_alone() -> TestResult<()> {
  let server = upstream(&PAPERS).await;
  let (config, _dir) = test_config(&server);

  let mut recorder = Recorder::default();
  let outcome = Pipeline::new(config.clone())?.discover(&mut recorder).await?;
  let papers = outcome.completed().expect("metadata query should complete");

  let ids: Vec<&str> = papers.iter().map(|paper| paper.id.as_str()).collect();
  let expected: Vec<&str> = PAPERS.iter().map(|(id, _)| *id).collect();
  assert_eq!(ids, expected);
  assert_eq!(papers[0].pdf_url, format!("{}/pdf/2401.00005v1", server.uri()));
  assert_eq!(recorder.events, vec![Event::FetchStarted(10), Event::Found(5)]);
  assert!(!config.output_dir.exists());
  Ok(())
}
