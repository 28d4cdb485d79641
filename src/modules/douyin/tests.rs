use super::*;
use crate::test::*;
use httptest::{matchers::*, responders::*, Expectation, Server};

fn douyin() -> Douyin {
    let env = TestEnv::new();
    Douyin::new(&env.config.http, &env.config.douyin).unwrap()
}

fn page(item: &str) -> String {
    format!(
        r#"<script>window._ROUTER_DATA = {{"loaderData":{{"video_(id)/page":{{"videoInfoRes":{{"item_list":[{}]}}}}}}}}</script>"#,
        item
    )
}

#[tokio::test]
async fn video() {
    let server = Server::run();
    server.expect(
        Expectation::matching(httptest::all_of![
            request::method_path("GET", "/video/7301234567890123456"),
            request::headers(contains(key("user-agent"))),
            request::headers(contains(("accept-language", "zh-CN,zh;q=0.9,en;q=0.8"))),
            request::headers(not(contains(key("referer")))),
        ])
        .respond_with(status_code(200).body(fixture("douyin", "video.html"))),
    );

    let meta = douyin()
        .extract(&server.url_str("/video/7301234567890123456"))
        .await
        .unwrap();

    insta::assert_json_snapshot!(meta, @r###"
    {
      "platform": "douyin",
      "videoId": "7301234567890123456",
      "authorName": "shanye",
      "uniqueId": "1234567",
      "authorAvatar": "https://p3.douyinpic.com/aweme/100x100/avatar.jpeg",
      "title": "loves the outdoors",
      "cover": "https://p3-sign.douyinpic.com/cover-large.jpeg",
      "videoUrl": "https://aweme.snssdk.com/aweme/v1/play/?video_id=v0200fg10000&ratio=720p&line=0",
      "createdTime": "2023-11-14T22:13:20.000Z",
      "desc": "weekend hike #outdoors",
      "diggCount": 1520,
      "collectCount": 88,
      "commentCount": 64,
      "shareCount": 12,
      "viewCount": 0,
      "duration": 15300
    }
    "###);
}

#[test]
fn slideshow() {
    let meta = find_item(&fixture("douyin", "slideshow.html"))
        .unwrap()
        .into_metadata()
        .unwrap();

    assert_eq!(meta.video_url, "https://p3-sign.douyinpic.com/cover-small.jpeg");
    assert_eq!(meta.cover, "https://p3-sign.douyinpic.com/cover-large.jpeg");
    assert_eq!(meta.unique_id, "shanye_wang");
    assert_eq!(meta.author_name, "山野小王");
    assert_eq!(meta.title, "热爱户外");
    assert_eq!(meta.desc, "周末去爬山 #户外");
    assert_eq!(meta.view_count, 0);
    assert_eq!(meta.duration, 0);
}

#[test]
fn slideshow_without_play_addr() {
    let item = r#"{"aweme_type":2,"author":null,"statistics":"n/a","video":{"play_addr":null,"cover":{"url_list":["https://p3.douyinpic.com/a.jpeg",null,"https://p3.douyinpic.com/c.jpeg"]}}}"#;
    let meta = find_item(&page(item)).unwrap().into_metadata().unwrap();

    assert_eq!(meta.video_url, "https://p3.douyinpic.com/a.jpeg");
    assert_eq!(meta.cover, "https://p3.douyinpic.com/c.jpeg");
    assert_eq!(meta.author_name, "");
    assert_eq!(meta.author_avatar, "");
    assert_eq!(meta.digg_count, 0);
}

#[test]
fn odd_url_lists() {
    let item = r#"{"author":{"avatar_thumb":"https://p3.douyinpic.com/avatar.jpeg"},"video":{"play_addr":{"url_list":null},"cover":{"url_list":"https://p3.douyinpic.com/c.jpeg"}}}"#;
    let meta = find_item(&page(item)).unwrap().into_metadata().unwrap();

    assert_eq!(meta.author_avatar, "");
    assert_eq!(meta.video_url, "");
    assert_eq!(meta.cover, "");
}

#[test]
fn watermark_is_removed_once() {
    let item = r#"{"aweme_type":0,"video":{"play_addr":{"url_list":[
        "https://v.example.com/playwm/video.mp4?next=playwm",
        "https://v.example.com/other.mp4"
    ]}}}"#
        .replace('\n', "");
    let meta = find_item(&page(&item)).unwrap().into_metadata().unwrap();
    assert_eq!(
        meta.video_url,
        "https://v.example.com/play/video.mp4?next=playwm"
    );
}

#[test]
fn missing_fields_get_defaults() {
    let meta = find_item(&page(r#"{"aweme_id":7301}"#))
        .unwrap()
        .into_metadata()
        .unwrap();

    assert_eq!(meta.platform, Platform::Douyin);
    assert_eq!(meta.video_id, "7301");
    assert_eq!(meta.author_name, "");
    assert_eq!(meta.unique_id, "");
    assert_eq!(meta.cover, "");
    assert_eq!(meta.video_url, "");
    assert_eq!(meta.created_time, "1970-01-01T00:00:00.000Z");
    assert_eq!(
        (
            meta.digg_count,
            meta.collect_count,
            meta.comment_count,
            meta.share_count,
            meta.view_count,
            meta.duration
        ),
        (0, 0, 0, 0, 0, 0)
    );
}

#[test]
fn no_router_data() {
    let err = find_item("<html><body>nothing to see</body></html>").unwrap_err();
    assert_eq!(err.to_string(), "无法提取视频数据");
}

#[test]
fn no_item() {
    let body = r#"<script>window._ROUTER_DATA = {"loaderData":{"video_(id)/page":{"videoInfoRes":{"item_list":[]}}}}</script>"#;
    let err = find_item(body).unwrap_err();
    assert_eq!(err.downcast_ref::<Error>(), Some(&Error::Extraction("无法提取视频数据")));

    let body = r#"<script>window._ROUTER_DATA = {"loaderData":{}}</script>"#;
    assert!(find_item(body).is_err());
}

#[tokio::test]
async fn error_page() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/gone"))
            .respond_with(status_code(404).body("<html>not found</html>")),
    );

    let err = douyin().extract(&server.url_str("/gone")).await.unwrap_err();
    assert_eq!(err.to_string(), "无法提取视频数据");
}
