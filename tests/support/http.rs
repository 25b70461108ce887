use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serve `responses` to successive connections, then stop listening.
///
/// Returns the URL of `results.json` on the bound port.
pub fn serve(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/results.json")
}

pub fn json_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

pub fn status_response(code: u16, reason: &str) -> String {
    format!("HTTP/1.1 {code} {reason}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
}

/// A results document with `count` numbered samples.
pub fn results_json(count: usize) -> String {
    let results: Vec<String> = (0..count)
        .map(|index| {
            format!(
                r#"{{"path": "audio/sample_{:05}.wav", "ground_truth": "clip {index} text", "prediction": "RecognitionResult(text='clip {index} text', tokens=[])"}}"#,
                index + 1
            )
        })
        .collect();
    format!(
        r#"{{"model_checkpoint": "ckpt-42", "overall_wer": 0.0, "results": [{}]}}"#,
        results.join(",")
    )
}
