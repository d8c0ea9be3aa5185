use crate::{
    data::student::{Student, StudentForm},
    error::RosterResult,
    maud_conveniences::{
        error_banner, form_submit_button, notice_banner, simple_form_element, table, title,
    },
    state::RosterState,
    view::ManagementView,
};
use axum::{
    Form,
    extract::{Path, Query, State},
};
use maud::{Markup, html};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    pub confirmed: Option<bool>,
}

/// Full page. Opening it resets the console and fetches the list from the
/// backend.
#[axum::debug_handler]
pub async fn get_students(
    State(state): State<RosterState>,
    Query(SearchQuery { search }): Query<SearchQuery>,
) -> Markup {
    state.mount().await;

    let console = {
        let mut view = state.view().await;
        if let Some(search) = search {
            view.set_search_term(search);
        }
        render_console(&mut view)
    };

    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full flex flex-col space-y-4" {
            (console)
        }
    })
}

pub async fn internal_get_console(
    State(state): State<RosterState>,
    Query(SearchQuery { search }): Query<SearchQuery>,
) -> Markup {
    let mut view = state.view().await;
    if let Some(search) = search {
        view.set_search_term(search);
    }
    render_console(&mut view)
}

pub async fn internal_get_students_table(
    State(state): State<RosterState>,
    Query(SearchQuery { search }): Query<SearchQuery>,
) -> Markup {
    let mut view = state.view().await;
    view.set_search_term(search.unwrap_or_default());
    render_table(&view)
}

pub async fn internal_post_student(
    State(state): State<RosterState>,
    Form(form): Form<StudentForm>,
) -> Markup {
    state.create_student(form).await;
    render_console(&mut *state.view().await)
}

pub async fn internal_put_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
    Form(form): Form<StudentForm>,
) -> RosterResult<Markup> {
    state.update_student(&id, form).await?;
    Ok(render_console(&mut *state.view().await))
}

pub async fn internal_get_edit_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
) -> RosterResult<Markup> {
    state.edit_student(&id).await?;
    Ok(render_console(&mut *state.view().await))
}

pub async fn internal_post_cancel_edit(State(state): State<RosterState>) -> Markup {
    state.cancel_edit().await;
    render_console(&mut *state.view().await)
}

pub async fn internal_delete_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
    Query(DeleteQuery { confirmed }): Query<DeleteQuery>,
) -> RosterResult<Markup> {
    state.delete_student(&id, confirmed.into()).await?;
    Ok(render_console(&mut *state.view().await))
}

fn render_console(view: &mut ManagementView) -> Markup {
    let notice = view.take_notice();

    html! {
        div id="console" class="container mx-auto flex flex-col space-y-4" {
            (title("Manage Students"))
            @if !view.in_flight().is_empty() && !view.is_loading() {
                div class="italic text-gray-400" {"Working..."}
            }

            @if let Some(error) = view.error() {
                (error_banner(error))
            }
            @if let Some(notice) = notice {
                (notice_banner(notice.text(), notice.is_blocking()))
            }

            div class="flex rounded" {
                input value=(view.search_term()) type="search" name="search" placeholder="Search by name or email" hx-get="/internal/students/table" hx-trigger="input changed delay:300ms, keyup[key=='Enter']" hx-target="#students_table" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
            }

            (render_form(view))

            div id="students_table" {
                (render_table(view))
            }
        }
    }
}

fn render_form(view: &ManagementView) -> Markup {
    let form = view.form();
    let editing = view.is_editing();
    let (create_url, update_url) = match view.editing() {
        Some(id) => (None, Some(format!("/internal/students/{id}"))),
        None => (Some("/internal/students"), None),
    };

    html! {
        form hx-post=[create_url] hx-put=[update_url] hx-trigger="submit" hx-target="#console" hx-swap="outerHTML" class="p-4 bg-gray-700 rounded" {
            @if let Some(id) = view.editing() {
                h2 class="text-lg font-semibold mb-4" {"Editing student " (id)}
            }
            (simple_form_element("full_name", "Full Name", true, None, Some(form.full_name.as_str())))
            (simple_form_element("phone", "Phone", true, None, Some(form.phone.as_str())))
            (simple_form_element("email", "Email", true, Some("email"), Some(form.email.as_str())))
            (simple_form_element("password", "Password", !editing, Some("password"), None))
            (simple_form_element("confirm_password", "Confirm Password", !editing, Some("password"), None))

            div class="flex items-center space-x-4" {
                @if editing {
                    (form_submit_button(Some("Update Student")))
                    button type="button" hx-post="/internal/students/cancel" hx-target="#console" hx-swap="outerHTML" class="bg-gray-500 hover:bg-gray-600 font-bold py-2 px-4 rounded" {
                        "Cancel"
                    }
                } @else {
                    (form_submit_button(Some("Add Student")))
                }
            }
        }
    }
}

fn render_table(view: &ManagementView) -> Markup {
    if view.is_loading() {
        return html! {
            div class="italic text-gray-300" {"Loading..."}
        };
    }

    let rows: Vec<_> = view.filtered().into_iter().map(student_to_row).collect();
    let caption = html! {
        p class="text-sm text-gray-400 mb-2" {
            "Showing " (rows.len()) " of " (view.students().len()) " students"
        }
    };

    table(
        caption,
        ["Full Name", "Phone", "Email", "Actions"],
        rows,
        "No students found",
    )
}

fn student_to_row(student: &Student) -> [Markup; 4] {
    let id = student.id.to_string();

    [
        html! {(student.full_name)},
        html! {(student.phone)},
        html! {(student.email)},
        html! {
            div class="flex flex-row space-x-2" {
                button hx-get={"/internal/students/" (id) "/edit"} hx-target="#console" hx-swap="outerHTML" class="bg-blue-600 hover:bg-blue-800 font-bold py-1 px-3 rounded" {
                    "Edit"
                }
                button hx-delete={"/internal/students/" (id)} hx-vals="{\"confirmed\": true}" hx-confirm="Are you sure you want to delete this student?" hx-target="#console" hx-swap="outerHTML" class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" {
                    "Delete"
                }
            }
        },
    ]
}

#[cfg(test)]
mod tests {
    use crate::{
        api::fake::{Call, FakeBackend},
        config::{BackendConfig, RuntimeConfiguration},
        data::student::{Student, StudentId},
        router,
        state::RosterState,
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;

    fn setup() -> (RosterState, Arc<FakeBackend>) {
        let backend = Arc::new(FakeBackend::with_students(vec![
            Student {
                id: StudentId::Number(1),
                full_name: "Ada Lovelace".into(),
                phone: "555-0101".into(),
                email: "ada@example.com".into(),
            },
            Student {
                id: StudentId::Number(2),
                full_name: "Alan Turing".into(),
                phone: "555-0102".into(),
                email: "alan@bletchley.org".into(),
            },
        ]));
        let config = RuntimeConfiguration::from_backend_config(BackendConfig::with_base_url(
            "http://backend.invalid",
            Duration::from_secs(1),
        ));
        (RosterState::with_backend(config, backend.clone()), backend)
    }

    async fn send(state: &RosterState, request: Request<Body>) -> (StatusCode, String) {
        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn opening_the_page_loads_and_renders_every_record() {
        let (state, backend) = setup();
        let (status, body) = send(&state, get("/students")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(backend.calls(), vec![Call::List]);
        assert!(body.contains("Ada Lovelace"));
        assert!(body.contains("Alan Turing"));
        assert!(body.contains("Add Student"));
    }

    #[tokio::test]
    async fn search_partial_filters_without_network() {
        let (state, backend) = setup();
        send(&state, get("/students")).await;

        let (status, body) = send(&state, get("/internal/students/table?search=BLETCHLEY")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Alan Turing"));
        assert!(!body.contains("Ada Lovelace"));
        assert_eq!(backend.calls(), vec![Call::List]);

        let (_, body) = send(&state, get("/internal/students/table?search=nobody")).await;
        assert!(body.contains("No students found"));
    }

    #[tokio::test]
    async fn posting_the_form_creates_a_student() {
        let (state, backend) = setup();
        send(&state, get("/students")).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/internal/students")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "full_name=Grace+Hopper&phone=555-0199&email=grace%40navy.mil&password=cobol&confirm_password=cobol",
            ))
            .unwrap();
        let (status, body) = send(&state, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Grace Hopper"));
        assert!(body.contains("Student added successfully!"));
        assert!(!body.contains("cobol"));
        assert!(matches!(backend.calls()[1], Call::Register { .. }));
    }

    #[tokio::test]
    async fn mismatched_passwords_raise_an_alert() {
        let (state, backend) = setup();
        send(&state, get("/students")).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/internal/students")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "full_name=Grace+Hopper&phone=1&email=g%40navy.mil&password=one&confirm_password=two",
            ))
            .unwrap();
        let (_, body) = send(&state, request).await;

        assert!(body.contains("Passwords do not match!"));
        assert_eq!(backend.calls(), vec![Call::List]);
    }

    fn form_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn add_form_creates_while_another_client_is_editing() {
        let (state, backend) = setup();
        send(&state, get("/students")).await;
        send(&state, get("/internal/students/2/edit")).await;

        let (status, body) = send(
            &state,
            form_request(
                Method::POST,
                "/internal/students",
                "full_name=Grace+Hopper&phone=555-0199&email=grace%40navy.mil&password=cobol&confirm_password=cobol",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            backend.calls(),
            vec![
                Call::List,
                Call::Register {
                    full_name: "Grace Hopper".into(),
                    has_password: true
                }
            ]
        );
        assert!(body.contains("Alan Turing"));
        assert!(body.contains("Grace Hopper"));
    }

    #[tokio::test]
    async fn edit_form_puts_to_the_edited_record() {
        let (state, backend) = setup();
        send(&state, get("/students")).await;

        let (_, body) = send(&state, get("/internal/students/2/edit")).await;
        assert!(body.contains("hx-put=\"/internal/students/2\""));
        assert!(!body.contains("hx-post=\"/internal/students\""));

        let (status, body) = send(
            &state,
            form_request(
                Method::PUT,
                "/internal/students/2",
                "full_name=Alan+M.+Turing&phone=555-0102&email=alan%40bletchley.org&password=&confirm_password=",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Student updated successfully!"));
        assert!(body.contains("Alan M. Turing"));
        assert_eq!(
            backend.calls()[1],
            Call::Update {
                id: StudentId::Number(2),
                full_name: "Alan M. Turing".into()
            }
        );

        let (status, _) = send(
            &state,
            form_request(
                Method::PUT,
                "/internal/students/99",
                "full_name=Nobody&phone=1&email=n%40x.org&password=&confirm_password=",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reopening_the_page_starts_clean() {
        let (state, backend) = setup();
        backend.fail_with("Backend offline");
        let (_, body) = send(&state, get("/students")).await;
        assert!(body.contains("Error fetching students: Backend offline"));

        backend.recover();
        send(&state, get("/internal/students/1/edit")).await;
        let (_, body) = send(&state, get("/students")).await;

        assert!(!body.contains("Error fetching students"));
        assert!(body.contains("Ada Lovelace"));
        assert!(body.contains("Add Student"));
        assert!(!body.contains("Update Student"));
    }

    #[tokio::test]
    async fn declined_delete_of_unlisted_id_changes_nothing() {
        let (state, backend) = setup();
        send(&state, get("/students")).await;

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/internal/students/99")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&state, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ada Lovelace"));
        assert_eq!(backend.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn edit_switches_the_form_into_update_mode() {
        let (state, _backend) = setup();
        send(&state, get("/students")).await;

        let (status, body) = send(&state, get("/internal/students/2/edit")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Update Student"));
        assert!(body.contains("Cancel"));
        assert!(body.contains("value=\"Alan Turing\""));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/internal/students/cancel")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(&state, request).await;
        assert!(body.contains("Add Student"));
    }

    #[tokio::test]
    async fn delete_only_happens_when_confirmed() {
        let (state, backend) = setup();
        send(&state, get("/students")).await;

        let declined = Request::builder()
            .method(Method::DELETE)
            .uri("/internal/students/1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&state, declined).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ada Lovelace"));
        assert_eq!(backend.calls(), vec![Call::List]);

        let confirmed = Request::builder()
            .method(Method::DELETE)
            .uri("/internal/students/1?confirmed=true")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(&state, confirmed).await;
        assert!(!body.contains("Ada Lovelace"));
        assert!(body.contains("Student deleted successfully!"));
        assert_eq!(backend.calls()[1], Call::Delete(StudentId::Number(1)));
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let (state, _backend) = setup();
        send(&state, get("/students")).await;

        let (status, _) = send(&state, get("/internal/students/99/edit")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn failed_load_shows_the_error_string() {
        let (state, backend) = setup();
        backend.fail_with("Backend offline");

        let (status, body) = send(&state, get("/students")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error fetching students: Backend offline"));
        assert!(body.contains("No students found"));
    }
}
