//! Binding builders to caller-supplied executors.
//!
//! The builder contract is public: request/response types defined
//! outside the crate implement the builder traits and plug into the
//! page walker with their own executor.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::TryStreamExt;

use sonarapi::{
    ApiRequest, Execute, Executor, PageMeta, PagedBuilder, PagedRequest, PagedResponse, Paging,
    RequestBuilder, Result,
};

/// A request for an endpoint this crate has no client for.
#[derive(Debug, Clone, Default)]
struct MeasureHistoryRequest {
    metric: Option<String>,
    p: Option<u32>,
    ps: Option<u32>,
}

impl ApiRequest for MeasureHistoryRequest {}

impl PagedRequest for MeasureHistoryRequest {
    fn set_page(&mut self, page: u32) {
        self.p = Some(page);
    }
    fn set_page_size(&mut self, page_size: u32) {
        self.ps = Some(page_size);
    }
}

#[derive(Debug, Clone)]
struct MeasureHistoryPage {
    paging: Option<Paging>,
    measures: Vec<f64>,
}

impl PagedResponse for MeasureHistoryPage {
    type Item = f64;

    fn page_meta(&self) -> PageMeta {
        PageMeta::from_parts(self.paging.clone(), None)
    }

    fn into_items(self) -> Vec<f64> {
        self.measures
    }
}

/// Serves a fixed 3-item dataset, 2 per page, recording each request's
/// metric filter and page number.
fn in_memory_executor(
    calls: Arc<Mutex<Vec<(Option<String>, Option<u32>)>>>,
) -> Executor<MeasureHistoryRequest, MeasureHistoryPage> {
    Arc::new(
        move |req: MeasureHistoryRequest| -> BoxFuture<'static, Result<MeasureHistoryPage>> {
            calls.lock().unwrap().push((req.metric.clone(), req.p));
            let page = req.p.unwrap_or(1);
            Box::pin(async move {
                Ok(MeasureHistoryPage {
                    paging: Some(Paging {
                        page_index: page,
                        page_size: 2,
                        total: 3,
                    }),
                    measures: if page == 1 { vec![1.5, 2.5] } else { vec![3.5] },
                })
            })
        },
    )
}

#[tokio::test]
async fn test_external_types_drive_the_page_walker() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let builder = PagedBuilder::new(
        MeasureHistoryRequest {
            metric: Some("coverage".to_string()),
            ..Default::default()
        },
        in_memory_executor(Arc::clone(&calls)),
    );

    let measures: Vec<f64> = builder.all().try_collect().await.unwrap();

    assert_eq!(measures, vec![1.5, 2.5, 3.5]);
    let seen = calls.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (Some("coverage".to_string()), Some(1)),
            (Some("coverage".to_string()), Some(2)),
        ]
    );
}

#[tokio::test]
async fn test_external_single_shot_builder() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let builder = RequestBuilder::new(
        MeasureHistoryRequest::default(),
        in_memory_executor(Arc::clone(&calls)),
    );

    let page = builder.execute().await.unwrap();

    assert_eq!(page.measures, vec![1.5, 2.5]);
    assert_eq!(calls.lock().unwrap().len(), 1);
}
