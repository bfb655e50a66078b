use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha1::Sha1;

const BASE_URL: &str = "http://127.0.0.1:3000";
const PROJECT: &str = "storefront";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    println!("Starting Deploytics test client...");

    let body = json!({
        "type": "deployment.succeeded",
        "payload": {
            "deployment": {
                "name": PROJECT,
                "meta": {
                    "commit_message": "feat: demo deploy from test client",
                    "commit_sha": "abcdef1234567890",
                    "github_commit_ref": "main"
                }
            }
        }
    })
    .to_string();

    println!("\n[1/3] Posting Vercel-style webhook...");
    let mut req = client
        .post(format!("{}/hooks/vercel", BASE_URL))
        .header("content-type", "application/json")
        .body(body.clone());

    // 配置了 secret 就带签名；否则按宽松模式裸发
    if let Ok(secret) = std::env::var("DEPLOYTICS_SECURITY__VERCEL_WEBHOOK_SECRET") {
        let mut mac = Hmac::<Sha1>::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body.as_bytes());
        let sig = hex::encode(mac.finalize().into_bytes());
        println!("   -> Signing body with configured secret");
        req = req.header("x-vercel-signature", sig);
    }

    let resp = req.send().await?;
    if resp.status().is_success() {
        let v: Value = resp.json().await?;
        println!("   -> ✅ Response: {}", v);
    } else {
        println!("   -> ❌ {}: {}", resp.status(), resp.text().await?);
        return Ok(());
    }

    println!("\n[2/3] Waiting 1 second for async alert dispatch...");
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;

    println!("\n[3/3] Fetching recent deployments...");
    let resp = client
        .get(format!("{}/api/projects/{}/deployments", BASE_URL, PROJECT))
        .send()
        .await?;

    if resp.status().is_success() {
        let v: Value = resp.json().await?;
        println!("   -> {} deployment(s) on record:", v["total"]);
        for d in v["deployments"].as_array().into_iter().flatten() {
            println!(
                "      - [{}] {} {} ({})",
                d["created_at"].as_str().unwrap_or("?"),
                d["status"].as_str().unwrap_or("?"),
                d["commit_message"].as_str().unwrap_or(""),
                d["branch"].as_str().unwrap_or("")
            );
        }
    } else {
        println!("   -> ❌ {}: {}", resp.status(), resp.text().await?);
    }

    Ok(())
}
