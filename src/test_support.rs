// 测试辅助：在本地随机端口上启动模拟后端

use axum::Router;
use tokio::net::TcpListener;

/// 启动后端并返回基础地址（如 `http://127.0.0.1:54321`）
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// 返回一个当前没有任何服务监听的地址
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}", addr)
}
