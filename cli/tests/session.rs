//! Scripted terminal session against the live mock server.

use std::net::SocketAddr;

use todo_cli::{run_session, UreqTransport};
use todo_sync_core::{App, TodoClient, TodoId, TodoSync};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn scripted_session() {
    let addr = start_server();
    let client = TodoClient::new(&format!("http://{addr}"));
    let mut app = App::new(TodoSync::new(client, UreqTransport::new()));

    let script = "\
title Buy milk
desc 2%
add
title Walk dog
add
toggle 1
edit 2
set-title Walk cat
save
delete 1
bogus
quit
title never reached
";
    let mut output = Vec::new();
    run_session(&mut app, script.as_bytes(), &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.starts_with("Todos\n"));
    assert!(output.contains("(no todos)"));
    assert!(output.contains("[x] #1 Buy milk  2%"));
    assert!(output.contains("editing: title=[Walk cat]"));
    assert!(output.contains("! unknown command \"bogus\""));

    let todos: Vec<_> = app.sync().state().items().cloned().collect();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, TodoId::Num(2));
    assert_eq!(todos[0].title, "Walk cat");
    assert!(!todos[0].completed);
    assert_eq!(app.sync().state().draft().title, "");
    assert!(app.notice().is_none());
}

#[test]
fn unreachable_backend_shows_a_notice() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = TodoClient::new(&format!("http://{addr}"));
    let mut app = App::new(TodoSync::new(client, UreqTransport::new()));

    let mut output = Vec::new();
    run_session(&mut app, "quit\n".as_bytes(), &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("! Could not load todos: backend unreachable"), "{output}");
}
