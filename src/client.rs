use tracing::{debug, error, instrument};

use crate::api;
use crate::error::{PortalError, Result};
use crate::model::*;
use crate::ranking;
use crate::report::AssessmentReport;
use crate::review::AnswerSheet;

/// Environment variable read by [`PortalClient::from_env`].
pub const BASE_URL_ENV: &str = "PORTAL_API_BASE_URL";

/// The main entry point for interacting with the assessment portal API.
///
/// `PortalClient` wraps a [`reqwest::Client`] and the API base URL, and
/// exposes methods to authenticate, fetch tests and students, start and
/// submit attempts, and rank a test's results.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> assess_portal::Result<()> {
/// use assess_portal::PortalClient;
///
/// let client = PortalClient::new("http://localhost:5000/api");
/// let ranking = client.ranking("67d1f0c2a9").await?;
/// for entry in &ranking.overall {
///     println!("{} {}", entry.rank, entry.attempt.student.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// Create a new client with default settings.
    ///
    /// Requests have no timeout; use [`PortalClient::with_client`] to set one.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: client,
            base_url,
        }
    }

    /// Create a client for the base URL in `PORTAL_API_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
            .ok_or(PortalError::MissingConfig(BASE_URL_ENV))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in and open a session for the student.
    #[instrument(skip(self, password))]
    pub async fn login(&self, rollno: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            rollno: rollno.to_string(),
            password: password.to_string(),
        };
        api::auth::login(&self.http, &self.base_url, &request).await
    }

    /// End a session. The API keeps no server-side session, so this only
    /// drops the token.
    #[instrument(skip(self, session), fields(student_id = %session.student.id))]
    pub fn logout(&self, session: Session) {
        debug!("logged out");
        drop(session);
    }

    /// Register a new student account.
    #[instrument(skip(self, registration), fields(rollno = %registration.rollno))]
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        api::auth::register(&self.http, &self.base_url, registration).await
    }

    /// Fetch every available test.
    #[instrument(skip(self))]
    pub async fn get_tests(&self) -> Result<Vec<Test>> {
        api::assessments::get_tests(&self.http, &self.base_url).await
    }

    /// Fetch one test with its categories and questions.
    #[instrument(skip(self))]
    pub async fn get_test(&self, test_id: &str) -> Result<Test> {
        api::assessments::get_test(&self.http, &self.base_url, test_id).await
    }

    /// Fetch the full student roster.
    #[instrument(skip(self))]
    pub async fn get_students(&self) -> Result<Vec<Student>> {
        api::students::get_students(&self.http, &self.base_url).await
    }

    /// Fetch one student record, including their assigned tests.
    #[instrument(skip(self))]
    pub async fn get_student(&self, student_id: &str, year: u32) -> Result<Student> {
        api::students::get_student(&self.http, &self.base_url, student_id, year).await
    }

    /// Fetch the session's own student record.
    #[instrument(skip(self, session), fields(student_id = %session.student.id))]
    pub async fn current_student(&self, session: &Session) -> Result<Student> {
        self.get_student(&session.student.id, session.student.year)
            .await
    }

    /// Start `test_id` for the logged-in student.
    ///
    /// A test the student has already completed is never restarted.
    #[instrument(skip(self, session), fields(student_id = %session.student.id))]
    pub async fn start_test(&self, session: &Session, test_id: &str) -> Result<StartOutcome> {
        let student = self.current_student(session).await?;
        api::assessments::start_test(&self.http, &self.base_url, session, &student, test_id).await
    }

    /// Hand in an answer sheet.
    ///
    /// Marks are computed and sent only once every question of every category
    /// has been submitted on the sheet.
    #[instrument(
        skip(self, session, test, sheet),
        fields(student_id = %session.student.id, test_id = %test.id)
    )]
    pub async fn submit_test(
        &self,
        session: &Session,
        test: &Test,
        sheet: &AnswerSheet,
    ) -> Result<SubmitOutcome> {
        let completed_categories = sheet.completed_categories(test);
        if completed_categories.len() != test.categories.len() {
            debug!(
                completed = completed_categories.len(),
                total = test.categories.len(),
                "answer sheet incomplete, not submitting"
            );
            return Ok(SubmitOutcome::Incomplete {
                completed_categories,
            });
        }

        let marks = sheet.compute_marks(test);
        api::assessments::submit_marks(&self.http, &self.base_url, session, &test.id, &marks)
            .await?;
        Ok(SubmitOutcome::Submitted { marks })
    }

    /// Fetch the roster once and rank everyone who completed `test_id`.
    #[instrument(skip(self))]
    pub async fn ranking(&self, test_id: &str) -> Result<RankingView> {
        let roster = self.get_students().await.inspect_err(|e| {
            error!(error = %e, "failed to fetch student data");
        })?;
        Ok(ranking::compute_ranking_view(&roster, test_id))
    }

    /// Build the report for the logged-in student's completed attempt at
    /// `test_id`, or `None` if they have not completed it.
    #[instrument(skip(self, session), fields(student_id = %session.student.id))]
    pub async fn report(
        &self,
        session: &Session,
        test_id: &str,
    ) -> Result<Option<AssessmentReport>> {
        let (test, student) =
            tokio::try_join!(self.get_test(test_id), self.current_student(session))?;
        let report = student
            .completed_attempt(test_id)
            .map(|attempt| AssessmentReport::build(&student.profile, &test, attempt));
        Ok(report)
    }
}
